/// Command prefixes whose instances can coexist as siblings, e.g.
/// `interface Gi1` next to `interface Gi2`, or several `neighbor` lines.
///
/// Anything else is a singleton: setting a new value replaces the old one.
/// Keep this list current or replacements will be missed.
pub const REPEATABLE_PREFIXES: &[&str] = &[
	"interface",
	"router",
	"access-list",
	"policy-map",
	"ip prefix",
	"ipv6 prefix",
	"neighbor",
	"ip address",
	"ipv6 address",
	"snmp-server enable traps",
	"vlan",
];

/// Check a command against the built-in repeatable list.
pub fn is_repeatable(command: &str) -> bool {
	REPEATABLE_PREFIXES.iter().any(|p| command.starts_with(p))
}

/// Repeatable-command classifier, extendable with extra prefixes.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
	extra: Vec<String>,
}

impl Classifier {
	pub fn new(extra: &[String]) -> Self {
		Classifier {
			extra: extra.to_vec(),
		}
	}

	pub fn is_repeatable(&self, command: &str) -> bool {
		is_repeatable(command) || self.extra.iter().any(|p| command.starts_with(p.as_str()))
	}
}
