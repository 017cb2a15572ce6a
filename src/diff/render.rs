use crate::diff::Action;

/// Render actions one per line as `<symbol> <indented command>`.
///
/// Returns an empty string when there is nothing to do.
pub fn render(actions: &[Action]) -> String {
	actions
		.iter()
		.map(Action::to_string)
		.collect::<Vec<_>>()
		.join("\n")
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diff::ActionKind;

	#[test]
	fn test_render_empty() {
		assert_eq!(render(&[]), "");
	}

	#[test]
	fn test_render_keeps_action_order() {
		let actions = vec![
			Action::new(ActionKind::Change, 0, "interface Gi1"),
			Action::new(ActionKind::Add, 1, "switchport mode access"),
			Action::new(ActionKind::Remove, 1, "switchport mode trunk"),
		];

		assert_eq!(
			render(&actions),
			"  interface Gi1\n+   switchport mode access\n-   switchport mode trunk"
		);
	}
}
