use std::path::PathBuf;

/// Library-level structured errors for confdiff.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ConfdiffError {
	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid value for `{field}`: {reason}")]
	InvalidConfig { field: String, reason: String },

	#[error("Invalid match pattern: {pattern}")]
	InvalidPattern {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Malformed indentation at line {line_number}: {line:?}")]
	MalformedIndentation { line_number: usize, line: String },

	#[error("Invalid argument: {reason}")]
	InvalidArgument { reason: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using ConfdiffError.
pub type Result<T> = std::result::Result<T, ConfdiffError>;
