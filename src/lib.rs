//! Confdiff - parse indented network device configurations and compute the
//! changes that turn a running configuration into a candidate.
//!
//! This library provides the core functionality for confdiff, including:
//! - Parsing whitespace-indented config text into an ordered command tree
//! - Classifying commands as repeatable or singleton
//! - Merging a candidate tree over a running tree into add/remove/change actions
//! - Rendering those actions as unified-diff-like text
//!
//! # Example
//!
//! ```
//! use confdiff_cli::{DiffConfig, Document};
//!
//! let running = Document::from_text(
//! 	"interface Gi1\n  switchport mode trunk\n",
//! 	DiffConfig::default(),
//! )
//! .unwrap();
//!
//! let diff = running.diff("interface Gi1\n  switchport mode access\n").unwrap();
//! assert_eq!(
//! 	diff,
//! 	"  interface Gi1\n+   switchport mode access\n-   switchport mode trunk"
//! );
//! ```

pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod rules;
pub mod tree;

pub use config::{DiffConfig, MatchMode};
pub use diff::{Action, ActionKind};
pub use document::{Candidate, Document};
pub use error::{ConfdiffError, Result};
pub use tree::ConfigTree;
