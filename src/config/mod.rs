//! Configuration loading and parsing for confdiff.
//!
//! This module handles:
//! - TOML config file parsing and validation
//! - Config discovery from the working directory upwards

pub mod cascade;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_config, generate_init_template, load_config, user_config_path,
};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{DiffConfig, LoadedConfig, MatchMode};
