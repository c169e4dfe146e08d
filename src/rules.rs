//! Ordered name-matching rules.
//!
//! Both the channel grouping and the unit classification are heuristics over a channel's name.
//! They are expressed as tables of [`Rule`]s evaluated top to bottom; the first rule with any
//! matching [`NameMatch`] wins.

use std::sync::LazyLock;

use regex::Regex;

/// One way a lower-cased channel name can match.
#[derive(Debug, Clone, Copy)]
pub enum NameMatch {
    /// Name contains the substring.
    Contains(&'static str),
    /// Name equals the string exactly.
    Equals(&'static str),
    /// Name matches the regular expression.
    Pattern(&'static LazyLock<Regex>),
}

impl NameMatch {
    /// Test an already lower-cased name.
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            NameMatch::Contains(needle) => lowered.contains(needle),
            NameMatch::Equals(s) => lowered == *s,
            NameMatch::Pattern(re) => re.is_match(lowered),
        }
    }
}

/// A tag assigned when any of `any_of` matches.
#[derive(Debug, Clone, Copy)]
pub struct Rule<T: 'static> {
    pub any_of: &'static [NameMatch],
    pub tag: T,
}

impl<T: Copy> Rule<T> {
    /// Whether this rule matches an already lower-cased name.
    pub fn matches(&self, lowered: &str) -> bool {
        self.any_of.iter().any(|m| m.matches(lowered))
    }
}

/// Evaluate `rules` in order against `name` (lower-cased first); first match wins.
pub fn first_match<T: Copy>(rules: &[Rule<T>], name: &str) -> Option<T> {
    let lowered = name.to_lowercase();
    rules.iter().find(|r| r.matches(&lowered)).map(|r| r.tag)
}
