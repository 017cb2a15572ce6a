use crate::config::types::DiffConfig;
use crate::error::{ConfdiffError, Result};
use crate::tree::ConfigTree;
use std::iter::Peekable;
use tracing::trace;

/// One input line, split into its indentation depth and command text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
	/// 1-based line number in the original text.
	pub number: usize,

	/// Count of leading whitespace characters.
	pub indent: usize,

	/// The line without its leading whitespace.
	pub text: &'a str,

	/// The line as it appeared in the input.
	pub raw: &'a str,
}

impl<'a> SourceLine<'a> {
	pub fn new(number: usize, raw: &'a str) -> Self {
		let text = raw.trim_start();
		let indent = raw[..raw.len() - text.len()].chars().count();
		SourceLine {
			number,
			indent,
			text,
			raw,
		}
	}
}

/// Parse configuration text into a tree.
///
/// Blank lines and lines starting with the configured comment marker are
/// dropped first. The comment check looks at the raw line, so an indented
/// marker is kept as a command.
pub fn parse_text(text: &str, config: &DiffConfig) -> Result<ConfigTree> {
	let lines = text
		.lines()
		.enumerate()
		.filter(|(_, line)| !line.trim().is_empty() && !line.starts_with(config.comments.as_str()))
		.map(|(i, line)| SourceLine::new(i + 1, line));

	parse_lines(lines, config.strict)
}

/// Parse pre-filtered lines into a tree.
///
/// A line opens a block that swallows every following line indented
/// deeper than itself. A dedent that lands between two enclosing levels is
/// attached to the nearest level indented less than it; with `strict` set
/// it fails with [`ConfdiffError::MalformedIndentation`] instead.
pub fn parse_lines<'a, I>(lines: I, strict: bool) -> Result<ConfigTree>
where
	I: IntoIterator<Item = SourceLine<'a>>,
{
	let mut cursor = lines.into_iter().peekable();
	parse_block(&mut cursor, 0, false, strict)
}

fn parse_block<'a, I>(
	cursor: &mut Peekable<I>,
	current_indent: usize,
	nested: bool,
	strict: bool,
) -> Result<ConfigTree>
where
	I: Iterator<Item = SourceLine<'a>>,
{
	let mut tree = ConfigTree::new();
	let mut sibling_indent: Option<usize> = None;

	// A nested block ends at the first line not indented past its opener;
	// the top level takes everything.
	while let Some(line) = cursor.next_if(|line| {
		line.indent > current_indent || (!nested && line.indent == current_indent)
	}) {
		let expected = *sibling_indent.get_or_insert(line.indent);
		if strict && expected != line.indent {
			return Err(ConfdiffError::MalformedIndentation {
				line_number: line.number,
				line: line.raw.to_string(),
			});
		}

		trace!(line = line.number, indent = line.indent, text = line.text, "parsed command");
		let children = parse_block(cursor, line.indent, true, strict)?;
		tree.insert_merged(line.text, children);
	}

	Ok(tree)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn parse(text: &str) -> ConfigTree {
		parse_text(text, &DiffConfig::default()).unwrap()
	}

	fn strict() -> DiffConfig {
		DiffConfig {
			strict: true,
			..Default::default()
		}
	}

	#[test]
	fn test_source_line_split() {
		let line = SourceLine::new(3, "   shutdown ");
		assert_eq!(line.indent, 3);
		assert_eq!(line.text, "shutdown ");
		assert_eq!(line.raw, "   shutdown ");
	}

	#[test]
	fn test_parse_nested_blocks() {
		let text = r#"
enable password whatever

interface Loopback0
  description "blah"
interface GigabitEthernet1
  description "bleh"

  fake nested
    nested nested configuration

  switchport mode trunk

interface GigabitEthernet2
  no ip address

interface GigabitEthernet3
 no ip address
 shutdown

 negotiation auto"#;

		let expected = json!({
			"enable password whatever": {},
			"interface Loopback0": {"description \"blah\"": {}},
			"interface GigabitEthernet1": {
				"description \"bleh\"": {},
				"fake nested": {"nested nested configuration": {}},
				"switchport mode trunk": {}
			},
			"interface GigabitEthernet2": {"no ip address": {}},
			"interface GigabitEthernet3": {
				"no ip address": {},
				"shutdown": {},
				"negotiation auto": {}
			}
		});

		assert_eq!(parse(text).to_nested_mapping(), expected);
	}

	#[test]
	fn test_comments_and_blank_lines_are_dropped() {
		let text = "!\n! generated\nhostname r1\n\n   \n!\nip routing\n";
		let tree = parse(text);

		assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["hostname r1", "ip routing"]);
	}

	#[test]
	fn test_custom_comment_marker() {
		let config = DiffConfig {
			comments: "#".to_string(),
			..Default::default()
		};
		let tree = parse_text("# header\nset system host-name r1\n", &config).unwrap();

		assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["set system host-name r1"]);
	}

	#[test]
	fn test_duplicate_blocks_accumulate() {
		let text = "interface Gi1\n  description a\nhostname r1\ninterface Gi1\n  shutdown\n";
		let tree = parse(text);

		assert_eq!(
			tree.to_nested_mapping(),
			json!({"interface Gi1": {"description a": {}, "shutdown": {}}, "hostname r1": {}})
		);
		assert_eq!(tree.keys().next(), Some("interface Gi1"));
	}

	#[test]
	fn test_misaligned_dedent_attaches_to_enclosing_block() {
		let text = "interface Gi1\n    description a\n  shutdown\nhostname r1\n";
		let tree = parse(text);

		assert_eq!(
			tree.to_nested_mapping(),
			json!({"interface Gi1": {"description a": {}, "shutdown": {}}, "hostname r1": {}})
		);
	}

	#[test]
	fn test_indented_first_line() {
		let text = "  interface Gi1\n    shutdown\n  interface Gi2\n";
		let tree = parse(text);

		assert_eq!(
			tree.to_nested_mapping(),
			json!({"interface Gi1": {"shutdown": {}}, "interface Gi2": {}})
		);
	}

	#[test]
	fn test_strict_rejects_misaligned_dedent() {
		let text = "interface Gi1\n    description a\n  shutdown\n";

		match parse_text(text, &strict()).unwrap_err() {
			ConfdiffError::MalformedIndentation { line_number, line } => {
				assert_eq!(line_number, 3);
				assert_eq!(line, "  shutdown");
			}
			_ => panic!("Expected MalformedIndentation error"),
		}
	}

	#[test]
	fn test_strict_accepts_consistent_indentation() {
		let text = "interface Gi1\n description a\n shutdown\ninterface Gi2\n";
		assert!(parse_text(text, &strict()).is_ok());
	}
}
