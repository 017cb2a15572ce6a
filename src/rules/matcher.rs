use crate::config::types::{DiffConfig, MatchMode};
use crate::error::{ConfdiffError, Result};
use crate::rules::classifier::Classifier;
use crate::tree::ConfigTree;
use regex::Regex;
use tracing::trace;

/// Finds the sibling commands that correspond to a probe command.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
	classifier: Classifier,
	mode: MatchMode,
}

impl Matcher {
	pub fn new(classifier: Classifier, mode: MatchMode) -> Self {
		Matcher { classifier, mode }
	}

	pub fn from_config(config: &DiffConfig) -> Self {
		Matcher::new(Classifier::new(&config.extra_repeatable), config.match_mode)
	}

	pub fn classifier(&self) -> &Classifier {
		&self.classifier
	}

	pub fn mode(&self) -> MatchMode {
		self.mode
	}

	/// Keys at this level of `tree` that start with `probe`, in tree order.
	///
	/// With `exact` unset the last word of the probe is dropped first, so
	/// `switchport mode access` also finds `switchport mode trunk`.
	pub fn find<'t>(&self, tree: &'t ConfigTree, probe: &str, exact: bool) -> Result<Vec<&'t str>> {
		let prefix = if exact { probe } else { truncate_probe(probe) };

		let found: Vec<&str> = match self.mode {
			MatchMode::Literal => tree.keys().filter(|key| key.starts_with(prefix)).collect(),
			MatchMode::Pattern => {
				let regex = compile_prefix(prefix)?;
				tree.keys().filter(|key| regex.is_match(key)).collect()
			}
		};

		trace!(probe, prefix, exact, matches = found.len(), "find");
		Ok(found)
	}

	/// Like [`Matcher::find`], with exactness decided by the classifier:
	/// repeatable commands need the full probe, singletons only their stem.
	pub fn find_similar<'t>(&self, tree: &'t ConfigTree, probe: &str) -> Result<Vec<&'t str>> {
		self.find(tree, probe, self.classifier.is_repeatable(probe))
	}
}

/// Drop the last space-separated word of `probe`, keeping the probe
/// whole when nothing would be left.
pub fn truncate_probe(probe: &str) -> &str {
	match probe.rsplit_once(' ') {
		Some((head, _)) if !head.is_empty() => head,
		_ => probe,
	}
}

fn compile_prefix(prefix: &str) -> Result<Regex> {
	Regex::new(&format!("^(?:{prefix})")).map_err(|source| ConfdiffError::InvalidPattern {
		pattern: prefix.to_string(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tree_of(keys: &[&str]) -> ConfigTree {
		let mut tree = ConfigTree::new();
		for key in keys {
			tree.set(*key, ConfigTree::new());
		}
		tree
	}

	#[test]
	fn test_truncate_probe() {
		assert_eq!(truncate_probe("switchport mode trunk"), "switchport mode");
		assert_eq!(truncate_probe("shutdown"), "shutdown");
		assert_eq!(truncate_probe("a b "), "a b");
	}

	#[test]
	fn test_exact_find_keeps_full_probe() {
		let tree = tree_of(&["neighbor 1.1.1.1 remote-as 1", "neighbor 1.1.1.2 remote-as 2"]);
		let matcher = Matcher::default();

		let found = matcher.find(&tree, "neighbor 1.1.1.1", true).unwrap();
		assert_eq!(found, vec!["neighbor 1.1.1.1 remote-as 1"]);
	}

	#[test]
	fn test_loose_find_drops_last_word() {
		let tree = tree_of(&["description x", "switchport mode trunk", "switchport access vlan 5"]);
		let matcher = Matcher::default();

		let found = matcher.find(&tree, "switchport mode access", false).unwrap();
		assert_eq!(found, vec!["switchport mode trunk"]);
	}

	#[test]
	fn test_find_similar_uses_classifier() {
		let tree = tree_of(&["interface Gi1", "interface Gi2", "hostname r1"]);
		let matcher = Matcher::default();

		assert!(matcher.find_similar(&tree, "interface Gi3").unwrap().is_empty());
		assert_eq!(matcher.find_similar(&tree, "hostname r2").unwrap(), vec!["hostname r1"]);
	}

	#[test]
	fn test_results_follow_tree_order() {
		let tree = tree_of(&["logging host 2.2.2.2", "hostname r1", "logging host 1.1.1.1"]);
		let matcher = Matcher::default();

		let found = matcher.find(&tree, "logging host 3.3.3.3", false).unwrap();
		assert_eq!(found, vec!["logging host 2.2.2.2", "logging host 1.1.1.1"]);
	}

	#[test]
	fn test_literal_mode_ignores_metacharacters() {
		let tree = tree_of(&["ip as-path access-list 1 permit ^65000$", "ip as-path access-list 1 permit _1_"]);
		let matcher = Matcher::default();

		let found = matcher.find(&tree, "ip as-path access-list 1 permit ^65000$", true).unwrap();
		assert_eq!(found, vec!["ip as-path access-list 1 permit ^65000$"]);
	}

	#[test]
	fn test_pattern_mode_treats_probe_as_regex() {
		let tree = tree_of(&["vlan 10", "vlan 20", "vlan 30"]);
		let matcher = Matcher::new(Classifier::default(), MatchMode::Pattern);

		let found = matcher.find(&tree, "vlan [12]0", true).unwrap();
		assert_eq!(found, vec!["vlan 10", "vlan 20"]);
	}

	#[test]
	fn test_pattern_mode_invalid_regex() {
		let tree = tree_of(&["vlan 10"]);
		let matcher = Matcher::new(Classifier::default(), MatchMode::Pattern);

		match matcher.find(&tree, "vlan (10", true).unwrap_err() {
			ConfdiffError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "vlan (10"),
			_ => panic!("Expected InvalidPattern error"),
		}
	}
}
