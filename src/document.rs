//! A parsed configuration bundled with the options it was parsed with.

use crate::config::types::DiffConfig;
use crate::diff::{Action, merge, render};
use crate::error::Result;
use crate::rules::Matcher;
use crate::tree::{ConfigTree, parse_text};
use serde_json::Value;
use tracing::debug;

/// What a running [`Document`] can be diffed against.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
	/// Configuration text, parsed with the running document's options.
	Text(&'a str),
	Tree(&'a ConfigTree),
	/// A nested mapping as produced by [`ConfigTree::to_nested_mapping`].
	Mapping(&'a Value),
}

impl<'a> From<&'a str> for Candidate<'a> {
	fn from(text: &'a str) -> Self {
		Candidate::Text(text)
	}
}

impl<'a> From<&'a String> for Candidate<'a> {
	fn from(text: &'a String) -> Self {
		Candidate::Text(text)
	}
}

impl<'a> From<&'a ConfigTree> for Candidate<'a> {
	fn from(tree: &'a ConfigTree) -> Self {
		Candidate::Tree(tree)
	}
}

impl<'a> From<&'a Document> for Candidate<'a> {
	fn from(document: &'a Document) -> Self {
		Candidate::Tree(&document.tree)
	}
}

impl<'a> From<&'a Value> for Candidate<'a> {
	fn from(mapping: &'a Value) -> Self {
		Candidate::Mapping(mapping)
	}
}

/// A running configuration, ready to be diffed against candidates.
#[derive(Debug, Clone)]
pub struct Document {
	tree: ConfigTree,
	config: DiffConfig,
	matcher: Matcher,
}

impl Document {
	/// Parse configuration text.
	pub fn from_text(text: &str, config: DiffConfig) -> Result<Self> {
		config.validate()?;
		let tree = parse_text(text, &config)?;
		Ok(Self::build(tree, config))
	}

	/// Wrap an already built tree.
	pub fn from_tree(tree: ConfigTree, config: DiffConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self::build(tree, config))
	}

	fn build(tree: ConfigTree, config: DiffConfig) -> Self {
		let matcher = Matcher::from_config(&config);
		Document {
			tree,
			config,
			matcher,
		}
	}

	pub fn tree(&self) -> &ConfigTree {
		&self.tree
	}

	/// Mutable access, e.g. to inject extra nodes.
	pub fn tree_mut(&mut self) -> &mut ConfigTree {
		&mut self.tree
	}

	pub fn config(&self) -> &DiffConfig {
		&self.config
	}

	pub fn to_nested_mapping(&self) -> Value {
		self.tree.to_nested_mapping()
	}

	/// Top-level commands that correspond to `probe`.
	pub fn find(&self, probe: &str, exact: bool) -> Result<Vec<&str>> {
		self.matcher.find(&self.tree, probe, exact)
	}

	/// Like [`Document::find`], with exactness taken from the classifier.
	pub fn find_similar(&self, probe: &str) -> Result<Vec<&str>> {
		self.matcher.find_similar(&self.tree, probe)
	}

	/// The actions that apply `candidate` on top of this document.
	pub fn actions<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Result<Vec<Action>> {
		let parsed;
		let candidate = match candidate.into() {
			Candidate::Tree(tree) => tree,
			Candidate::Text(text) => {
				parsed = parse_text(text, &self.config)?;
				&parsed
			}
			Candidate::Mapping(mapping) => {
				parsed = ConfigTree::from_nested_mapping(mapping)?;
				&parsed
			}
		};

		let actions = merge(&self.tree, candidate, &self.config.negators, &self.matcher, 0)?;
		debug!(count = actions.len(), "computed diff actions");
		Ok(actions)
	}

	/// The rendered diff of applying `candidate`; empty when nothing changes.
	pub fn diff<'a>(&self, candidate: impl Into<Candidate<'a>>) -> Result<String> {
		Ok(render(&self.actions(candidate)?))
	}
}
