//! Candidate-over-running merging and diff rendering for confdiff.
//!
//! This module handles:
//! - Walking a candidate tree against a running tree to collect actions
//! - Rendering actions as unified-diff-like text

pub mod merger;
pub mod render;

pub use merger::merge;
pub use render::render;

use std::fmt;

/// What an action does to the running configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
	Add,
	Remove,
	/// The command stays; something nested under it changes.
	Change,
}

impl ActionKind {
	/// The marker placed in front of a rendered diff line.
	pub fn symbol(&self) -> char {
		match self {
			ActionKind::Add => '+',
			ActionKind::Remove => '-',
			ActionKind::Change => ' ',
		}
	}
}

/// One step of a diff: a command at a nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
	pub kind: ActionKind,
	pub depth: usize,
	pub command: String,
}

impl Action {
	pub fn new(kind: ActionKind, depth: usize, command: impl Into<String>) -> Self {
		Action {
			kind,
			depth,
			command: command.into(),
		}
	}

	/// The command indented by two spaces per depth level.
	pub fn line(&self) -> String {
		format!("{}{}", "  ".repeat(self.depth), self.command)
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.kind.symbol(), self.line())
	}
}
