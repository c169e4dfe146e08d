//! Channel grouping by name.

use std::sync::LazyLock;

use regex::Regex;

use crate::rules::{NameMatch, Rule, first_match};
use crate::types::{ChannelGroup, ChannelGroups};

static COIL_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)c[0-9](?-u:\b)").expect("valid regex"));
static TRAVEL_SHORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)t[0-9](?-u:\b)").expect("valid regex"));

/// Grouping rules in priority order. Names matching none of them go to
/// [`ChannelGroup::Others`].
pub static GROUP_RULES: [Rule<ChannelGroup>; 4] = [
    Rule {
        any_of: &[NameMatch::Contains("coil current"), NameMatch::Pattern(&COIL_SHORT)],
        tag: ChannelGroup::CoilCurrents,
    },
    Rule {
        any_of: &[
            NameMatch::Contains("contact travel"),
            NameMatch::Contains("travel"),
            NameMatch::Pattern(&TRAVEL_SHORT),
        ],
        tag: ChannelGroup::ContactTravel,
    },
    Rule {
        any_of: &[
            NameMatch::Contains("dcrm res"),
            NameMatch::Contains("resistance"),
            NameMatch::Contains("res ch"),
        ],
        tag: ChannelGroup::DcrmResistance,
    },
    Rule {
        any_of: &[NameMatch::Contains("dcrm current"), NameMatch::Contains("current ch")],
        tag: ChannelGroup::DcrmCurrent,
    },
];

/// Group a single channel name.
pub fn classify_channel(name: &str) -> ChannelGroup {
    first_match(&GROUP_RULES, name).unwrap_or(ChannelGroup::Others)
}

/// Partition `names` into groups, preserving their order within each group.
pub fn group_channels<'a>(names: impl IntoIterator<Item = &'a str>) -> ChannelGroups {
    let mut groups = ChannelGroups::default();
    for name in names {
        groups.push(classify_channel(name), name);
    }
    groups
}
