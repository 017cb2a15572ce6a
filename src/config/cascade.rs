use crate::config::parser::parse_config_file;
use crate::config::types::{DiffConfig, LoadedConfig};
use crate::error::{ConfdiffError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = ".confdiff.toml";

/// Find the config file that applies to `start_dir`.
///
/// The lookup order is:
/// 1. `start_dir` and each of its ancestors, nearest first
/// 2. ~/.confdiff.toml
///
/// The first file found wins; configs are not merged.
pub fn discover_config(start_dir: &Path) -> Result<Option<LoadedConfig>> {
	for dir in start_dir.ancestors() {
		let config_path = dir.join(CONFIG_FILE_NAME);
		if config_path.is_file() {
			debug!(path = %config_path.display(), "found project config");
			let config = parse_config_file(&config_path)?;
			return Ok(Some(LoadedConfig {
				config,
				path: config_path,
			}));
		}
	}

	load_user_config()
}

/// Load the user's ~/.confdiff.toml if it exists.
fn load_user_config() -> Result<Option<LoadedConfig>> {
	let user_config_path = user_config_path()?;

	if user_config_path.is_file() {
		debug!(path = %user_config_path.display(), "found user config");
		let config = parse_config_file(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Resolve the effective config.
///
/// An explicit path must exist. Without one, discovery runs from
/// `start_dir`, and the defaults apply when nothing is found.
pub fn load_config(start_dir: &Path, explicit: Option<&Path>) -> Result<DiffConfig> {
	if let Some(path) = explicit {
		if !path.is_file() {
			return Err(ConfdiffError::ConfigNotFound {
				path: path.to_path_buf(),
			});
		}
		return parse_config_file(path);
	}

	match discover_config(start_dir)? {
		Some(loaded) => Ok(loaded.config),
		None => {
			debug!("no config file found, using defaults");
			Ok(DiffConfig::default())
		}
	}
}

/// Contents written by `confdiff --init`, spelling out the defaults.
pub fn generate_init_template() -> String {
	r#"# confdiff configuration
#
# Lines starting with this marker are ignored.
comments = "!"

# Leading words that mean "remove", e.g. `no shutdown`.
negators = ["no", "default"]

# "literal" compares command prefixes as plain text.
# "pattern" treats command text as a regex.
match-mode = "literal"

# Fail on inconsistent indentation instead of guessing the parent block.
strict = false

# Extra commands that may appear several times side by side.
extra-repeatable = []
"#
	.to_string()
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(ConfdiffError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
