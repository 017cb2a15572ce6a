//! Ordered command trees built from indented device configuration.
//!
//! Each level maps a command line (indentation removed) to the block of
//! commands nested beneath it. Insertion order is kept: it decides output
//! order and which match is found first.

pub mod parser;

pub use parser::{SourceLine, parse_lines, parse_text};

use crate::error::{ConfdiffError, Result};
use serde_json::{Map, Value};
use std::fmt;

/// An ordered mapping from command text to the block nested under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
	nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
	command: String,
	children: ConfigTree,
}

impl ConfigTree {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn contains(&self, command: &str) -> bool {
		self.position(command).is_some()
	}

	/// The block nested under `command`, if present at this level.
	pub fn get(&self, command: &str) -> Option<&ConfigTree> {
		self.position(command).map(|i| &self.nodes[i].children)
	}

	pub fn get_mut(&mut self, command: &str) -> Option<&mut ConfigTree> {
		self.position(command).map(|i| &mut self.nodes[i].children)
	}

	/// Set the block for `command`, replacing any existing block in place.
	/// New commands are appended.
	pub fn set(&mut self, command: impl Into<String>, children: ConfigTree) {
		let command = command.into();
		match self.position(&command) {
			Some(i) => self.nodes[i].children = children,
			None => self.nodes.push(Node { command, children }),
		}
	}

	/// Add `command` with `children`, folding into an existing node of the
	/// same name so repeated lines accumulate their blocks.
	pub fn insert_merged(&mut self, command: impl Into<String>, children: ConfigTree) {
		let command = command.into();
		match self.position(&command) {
			Some(i) => self.nodes[i].children.absorb(children),
			None => self.nodes.push(Node { command, children }),
		}
	}

	fn absorb(&mut self, other: ConfigTree) {
		for node in other.nodes {
			self.insert_merged(node.command, node.children);
		}
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.nodes.iter().map(|n| n.command.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigTree)> {
		self.nodes.iter().map(|n| (n.command.as_str(), &n.children))
	}

	fn position(&self, command: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.command == command)
	}

	/// Materialize the tree as nested JSON objects. Key order follows the
	/// tree; an empty block becomes `{}`.
	pub fn to_nested_mapping(&self) -> Value {
		let map: Map<String, Value> = self
			.iter()
			.map(|(command, children)| (command.to_string(), children.to_nested_mapping()))
			.collect();
		Value::Object(map)
	}

	/// Build a tree from nested JSON objects, the inverse of
	/// [`ConfigTree::to_nested_mapping`].
	pub fn from_nested_mapping(value: &Value) -> Result<Self> {
		let Value::Object(map) = value else {
			return Err(ConfdiffError::InvalidArgument {
				reason: format!("expected a nested mapping, got {}", json_kind(value)),
			});
		};

		let mut tree = ConfigTree::new();
		for (command, children) in map {
			let children = Self::from_nested_mapping(children).map_err(|e| match e {
				ConfdiffError::InvalidArgument { reason } => ConfdiffError::InvalidArgument {
					reason: format!("under {command:?}: {reason}"),
				},
				other => other,
			})?;
			tree.set(command.clone(), children);
		}
		Ok(tree)
	}

	fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
		for (command, children) in self.iter() {
			writeln!(f, "{}{}", "  ".repeat(depth), command)?;
			children.write_indented(f, depth + 1)?;
		}
		Ok(())
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

/// Renders the tree as indented configuration text, two spaces per level.
impl fmt::Display for ConfigTree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.write_indented(f, 0)
	}
}
