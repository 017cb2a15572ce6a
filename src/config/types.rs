use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfdiffError;

/// Options controlling how device configurations are parsed and diffed,
/// loaded from a `.confdiff.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DiffConfig {
	/// Lines starting with this marker are dropped before parsing.
	pub comments: String,

	/// Leading tokens that turn a candidate command into a removal.
	/// Order matters: the first negator that matches is stripped.
	pub negators: Vec<String>,

	/// How command text is compared against existing keys.
	pub match_mode: MatchMode,

	/// If true, inconsistent indentation is a parse error instead of
	/// being re-parented to the nearest enclosing block.
	pub strict: bool,

	/// Command prefixes treated as repeatable in addition to the built-in list.
	pub extra_repeatable: Vec<String>,
}

impl Default for DiffConfig {
	fn default() -> Self {
		DiffConfig {
			comments: "!".to_string(),
			negators: vec!["no".to_string(), "default".to_string()],
			match_mode: MatchMode::default(),
			strict: false,
			extra_repeatable: Vec::new(),
		}
	}
}

/// Comparison strategy used when looking up sibling commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
	/// Plain string-prefix comparison.
	#[default]
	Literal,

	/// Command text is compiled as an anchored regex, so metacharacters in
	/// the probe act as wildcards.
	Pattern,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: DiffConfig,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl DiffConfig {
	/// Validate field values that serde alone cannot check.
	pub fn validate(&self) -> Result<(), ConfdiffError> {
		if self.comments.is_empty() {
			return Err(invalid("comments", "comment marker must not be empty"));
		}

		for (i, negator) in self.negators.iter().enumerate() {
			if negator.is_empty() {
				return Err(invalid("negators", "negator must not be empty"));
			}
			if negator.chars().any(char::is_whitespace) {
				return Err(invalid(
					"negators",
					&format!("negator {negator:?} must be a single token"),
				));
			}
			if self.negators[..i].contains(negator) {
				return Err(invalid(
					"negators",
					&format!("negator {negator:?} is listed twice"),
				));
			}
		}

		if self.extra_repeatable.iter().any(|p| p.trim().is_empty()) {
			return Err(invalid("extra-repeatable", "prefix must not be empty"));
		}

		Ok(())
	}
}

fn invalid(field: &str, reason: &str) -> ConfdiffError {
	ConfdiffError::InvalidConfig {
		field: field.to_string(),
		reason: reason.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_is_valid() {
		let config = DiffConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.comments, "!");
		assert_eq!(config.negators, vec!["no", "default"]);
		assert_eq!(config.match_mode, MatchMode::Literal);
	}

	#[test]
	fn test_rejects_multi_token_negator() {
		let config = DiffConfig {
			negators: vec!["no shut".to_string()],
			..Default::default()
		};
		match config.validate().unwrap_err() {
			ConfdiffError::InvalidConfig { field, .. } => assert_eq!(field, "negators"),
			_ => panic!("Expected InvalidConfig error"),
		}
	}

	#[test]
	fn test_rejects_duplicate_negator() {
		let config = DiffConfig {
			negators: vec!["no".to_string(), "no".to_string()],
			..Default::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_rejects_empty_comment_marker() {
		let config = DiffConfig {
			comments: String::new(),
			..Default::default()
		};
		match config.validate().unwrap_err() {
			ConfdiffError::InvalidConfig { field, .. } => assert_eq!(field, "comments"),
			_ => panic!("Expected InvalidConfig error"),
		}
	}
}
