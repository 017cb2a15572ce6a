use crate::config::types::DiffConfig;
use crate::error::{ConfdiffError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<DiffConfig> {
	let content =
		std::fs::read_to_string(path).map_err(|source| ConfdiffError::ConfigReadError {
			path: path.to_path_buf(),
			source,
		})?;

	parse_config_str(&content, path)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<DiffConfig> {
	let config: DiffConfig =
		toml::from_str(content).map_err(|source| ConfdiffError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	config.validate()?;

	Ok(config)
}
