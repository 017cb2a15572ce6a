//! Command classification and sibling matching for confdiff.
//!
//! This module handles:
//! - Deciding whether a command may have several sibling instances
//! - Finding existing commands that a new or negated command corresponds to

pub mod classifier;
pub mod matcher;

pub use classifier::{Classifier, REPEATABLE_PREFIXES, is_repeatable};
pub use matcher::{Matcher, truncate_probe};
