use crate::diff::{Action, ActionKind};
use crate::error::Result;
use crate::rules::Matcher;
use crate::tree::ConfigTree;
use tracing::{debug, warn};

/// Collect the actions that apply `candidate` on top of `running`.
///
/// Candidate commands are visited in order:
/// - a negated command (`no <cmd>`) removes every running sibling that
///   corresponds to `<cmd>`, along with its block
/// - a command already present is merged one level down and reported as a
///   change only if something underneath differs
/// - a new command is added with its block, and any running sibling it
///   replaces is removed right after it
///
/// Running commands the candidate never mentions are left alone.
pub fn merge(
	running: &ConfigTree,
	candidate: &ConfigTree,
	negators: &[String],
	matcher: &Matcher,
	depth: usize,
) -> Result<Vec<Action>> {
	let mut actions = Vec::new();
	merge_into(&mut actions, running, candidate, negators, matcher, depth)?;
	Ok(actions)
}

fn merge_into(
	actions: &mut Vec<Action>,
	running: &ConfigTree,
	candidate: &ConfigTree,
	negators: &[String],
	matcher: &Matcher,
	depth: usize,
) -> Result<()> {
	for (command, children) in candidate.iter() {
		if let Some(target) = strip_negator(command, negators) {
			if target.is_empty() {
				warn!(command, "negator without a command, skipping");
				continue;
			}
			for found in matcher.find_similar(running, target)? {
				debug!(command, removed = found, "negated");
				remove_block(actions, running, found, depth);
			}
		} else if let Some(existing) = running.get(command) {
			let nested = merge(existing, children, negators, matcher, depth + 1)?;
			if !nested.is_empty() {
				actions.push(Action::new(ActionKind::Change, depth, command));
				actions.extend(nested);
			}
		} else {
			actions.push(Action::new(ActionKind::Add, depth, command));
			expand(actions, children, ActionKind::Add, depth + 1);

			for found in matcher.find_similar(running, command)? {
				debug!(command, replaced = found, "replaced");
				remove_block(actions, running, found, depth);
			}
		}
	}

	Ok(())
}

/// The command a negated line targets, if it starts with a negator token.
fn strip_negator<'c>(command: &'c str, negators: &[String]) -> Option<&'c str> {
	let (head, rest) = command.split_once(' ').unwrap_or((command, ""));
	negators.iter().any(|n| n == head).then_some(rest)
}

fn remove_block(actions: &mut Vec<Action>, running: &ConfigTree, command: &str, depth: usize) {
	actions.push(Action::new(ActionKind::Remove, depth, command));
	if let Some(children) = running.get(command) {
		expand(actions, children, ActionKind::Remove, depth + 1);
	}
}

/// Emit `kind` for every command in `tree`, depth-first.
fn expand(actions: &mut Vec<Action>, tree: &ConfigTree, kind: ActionKind, depth: usize) {
	for (command, children) in tree.iter() {
		actions.push(Action::new(kind, depth, command));
		expand(actions, children, kind, depth + 1);
	}
}
