//! The metric catalog.
//!
//! Every logged play refers to a stat definition by id. The catalog is the
//! fixed set of built-in volleyball metrics followed by any custom metrics
//! the user has defined on their profile. Each metric belongs to one of five
//! categories, which drive grouping in reports.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Category a metric is reported under.
///
/// Declaration order is the display order used everywhere in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatCategory {
    /// Kills, attack errors and attempts.
    Attacking,
    /// Aces and serve outcomes.
    Serving,
    /// Digs and serve receive.
    Defense,
    /// Assists and ball handling.
    Setting,
    /// Blocks and block errors.
    Blocking,
}

/// Categories in display order.
pub const CATEGORY_ORDER: [StatCategory; 5] = [
    StatCategory::Attacking,
    StatCategory::Serving,
    StatCategory::Defense,
    StatCategory::Setting,
    StatCategory::Blocking,
];

impl StatCategory {
    /// The category name as shown in reports and exports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attacking => "Attacking",
            Self::Serving => "Serving",
            Self::Defense => "Defense",
            Self::Setting => "Setting",
            Self::Blocking => "Blocking",
        }
    }

    /// The default two-letter alias for this category.
    #[must_use]
    pub fn default_alias(self) -> &'static str {
        match self {
            Self::Attacking => "AT",
            Self::Serving => "SV",
            Self::Defense => "DF",
            Self::Setting => "ST",
            Self::Blocking => "BK",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        CATEGORY_ORDER
            .into_iter()
            .find(|cat| {
                cat.as_str().eq_ignore_ascii_case(wanted)
                    || cat.default_alias().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| Error::invalid_input(format!("unknown category '{s}'")))
    }
}

/// Default aliases for every category.
#[must_use]
pub fn default_aliases() -> BTreeMap<StatCategory, String> {
    CATEGORY_ORDER
        .into_iter()
        .map(|cat| (cat, cat.default_alias().to_string()))
        .collect()
}

/// A single trackable metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDefinition {
    /// Stable identifier stored in every log entry.
    pub id: String,
    /// Short display label.
    pub label: String,
    /// Reporting category.
    pub category: StatCategory,
    /// Whether the metric is offered for tracking.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl StatDefinition {
    /// Create an enabled stat definition.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: StatCategory) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            category,
            enabled: true,
        }
    }
}

/// The built-in metrics, in catalog order.
const BUILT_IN: &[(&str, &str, StatCategory)] = &[
    ("kill", "Kill", StatCategory::Attacking),
    ("attack_err", "Atk Error", StatCategory::Attacking),
    ("attack_attempt", "Atk In Play", StatCategory::Attacking),
    ("attack_roll", "Roll Shot", StatCategory::Attacking),
    ("attack_tip", "Tip", StatCategory::Attacking),
    ("ace", "Ace", StatCategory::Serving),
    ("serve_err", "Srv Error", StatCategory::Serving),
    ("serve_in", "Srv In Play", StatCategory::Serving),
    ("dig", "Dig", StatCategory::Defense),
    ("dig_err", "Dig Error", StatCategory::Defense),
    ("reception_err", "Rec Error", StatCategory::Defense),
    ("reception_good", "Rec Good", StatCategory::Defense),
    ("assist", "Assist", StatCategory::Setting),
    ("set_attempt", "Set Attempt", StatCategory::Setting),
    ("bhe", "BHE (Double)", StatCategory::Setting),
    ("block_solo", "Solo Block", StatCategory::Blocking),
    ("block_assist", "Blk Assist", StatCategory::Blocking),
    ("block_touch", "Blk Touch", StatCategory::Blocking),
    ("block_err", "Blk Error", StatCategory::Blocking),
];

/// Well-known built-in stat ids used by derived metrics.
pub mod ids {
    /// Attack that scores directly.
    pub const KILL: &str = "kill";
    /// Attack hit out, into the net or blocked down.
    pub const ATTACK_ERROR: &str = "attack_err";
    /// Attack kept in play.
    pub const ATTACK_ATTEMPT: &str = "attack_attempt";
    /// Roll shot kept in play.
    pub const ATTACK_ROLL: &str = "attack_roll";
    /// Tip kept in play.
    pub const ATTACK_TIP: &str = "attack_tip";
    /// Serve that scores directly.
    pub const ACE: &str = "ace";
    /// Missed serve.
    pub const SERVE_ERROR: &str = "serve_err";
    /// Serve kept in play.
    pub const SERVE_IN: &str = "serve_in";
    /// Successful dig.
    pub const DIG: &str = "dig";
    /// Solo block.
    pub const BLOCK_SOLO: &str = "block_solo";
    /// Shared block.
    pub const BLOCK_ASSIST: &str = "block_assist";
}

/// All built-in stat definitions in catalog order.
#[must_use]
pub fn builtin_stats() -> Vec<StatDefinition> {
    BUILT_IN
        .iter()
        .map(|&(id, label, category)| StatDefinition::new(id, label, category))
        .collect()
}

/// Check whether an id belongs to a built-in stat.
#[must_use]
pub fn is_builtin(id: &str) -> bool {
    BUILT_IN.iter().any(|&(builtin, _, _)| builtin == id)
}

fn stat_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("stat id pattern is valid"))
}

fn non_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("non-word pattern is valid"))
}

/// Validate a stat id for use as a custom metric.
///
/// # Errors
///
/// Returns an error if the id is not lowercase snake case starting with a letter.
pub fn validate_stat_id(id: &str) -> Result<()> {
    if stat_id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "stat id '{id}' must be lowercase letters, digits and underscores, starting with a letter"
        )))
    }
}

/// Derive a stat id from a display label, e.g. `"Free Ball"` -> `"free_ball"`.
#[must_use]
pub fn slugify(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let slug = non_word_pattern().replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "custom".to_string()
    } else if slug.starts_with(|c: char| c.is_ascii_digit()) {
        format!("custom_{slug}")
    } else {
        slug.to_string()
    }
}

/// Built-in metrics followed by user-defined ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    stats: Vec<StatDefinition>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Catalog {
    /// Build a catalog from the built-ins plus the given custom metrics.
    #[must_use]
    pub fn new(custom: &[StatDefinition]) -> Self {
        let mut stats = builtin_stats();
        stats.extend(custom.iter().cloned());
        Self { stats }
    }

    /// Look up a metric by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&StatDefinition> {
        self.stats.iter().find(|s| s.id == id)
    }

    /// Check whether the id is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Display label for an id, falling back to the id itself.
    #[must_use]
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.find(id).map_or(id, |s| s.label.as_str())
    }

    /// Category name for an id, or `"Other"` when the id is unknown.
    #[must_use]
    pub fn category_name_for(&self, id: &str) -> &'static str {
        self.find(id).map_or("Other", |s| s.category.as_str())
    }

    /// Metrics in a category, in catalog order.
    pub fn by_category(&self, category: StatCategory) -> impl Iterator<Item = &StatDefinition> {
        self.stats.iter().filter(move |s| s.category == category)
    }

    /// All metrics in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &StatDefinition> {
        self.stats.iter()
    }

    /// Number of metrics in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether the catalog is empty (never true in practice).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let stats = builtin_stats();
        assert_eq!(stats.len(), 19);
        assert_eq!(stats[0].id, "kill");
        assert_eq!(stats[18].id, "block_err");
        assert!(stats.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_builtin_ids_unique() {
        let stats = builtin_stats();
        let mut ids: Vec<_> = stats.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), stats.len());
    }

    #[test]
    fn test_category_counts() {
        let catalog = Catalog::default();
        assert_eq!(catalog.by_category(StatCategory::Attacking).count(), 5);
        assert_eq!(catalog.by_category(StatCategory::Serving).count(), 3);
        assert_eq!(catalog.by_category(StatCategory::Defense).count(), 4);
        assert_eq!(catalog.by_category(StatCategory::Setting).count(), 3);
        assert_eq!(catalog.by_category(StatCategory::Blocking).count(), 4);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "attacking".parse::<StatCategory>().unwrap(),
            StatCategory::Attacking
        );
        assert_eq!("BK".parse::<StatCategory>().unwrap(), StatCategory::Blocking);
        assert!("offense".parse::<StatCategory>().is_err());
    }

    #[test]
    fn test_category_order_matches_ord() {
        let mut sorted = CATEGORY_ORDER;
        sorted.sort();
        assert_eq!(sorted, CATEGORY_ORDER);
    }

    #[test]
    fn test_default_aliases() {
        let aliases = default_aliases();
        assert_eq!(aliases.len(), 5);
        assert_eq!(aliases[&StatCategory::Defense], "DF");
    }

    #[test]
    fn test_catalog_with_custom_stats() {
        let custom = vec![StatDefinition::new(
            "free_ball",
            "Free Ball",
            StatCategory::Defense,
        )];
        let catalog = Catalog::new(&custom);
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.label_for("free_ball"), "Free Ball");
        assert_eq!(catalog.by_category(StatCategory::Defense).count(), 5);
    }

    #[test]
    fn test_label_and_category_fallback() {
        let catalog = Catalog::default();
        assert_eq!(catalog.label_for("kill"), "Kill");
        assert_eq!(catalog.label_for("mystery"), "mystery");
        assert_eq!(catalog.category_name_for("ace"), "Serving");
        assert_eq!(catalog.category_name_for("mystery"), "Other");
    }

    #[test]
    fn test_is_builtin() {
        assert!(is_builtin("bhe"));
        assert!(!is_builtin("free_ball"));
    }

    #[test]
    fn test_validate_stat_id() {
        assert!(validate_stat_id("free_ball").is_ok());
        assert!(validate_stat_id("pass3").is_ok());
        assert!(validate_stat_id("Free").is_err());
        assert!(validate_stat_id("3pass").is_err());
        assert!(validate_stat_id("").is_err());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Free Ball"), "free_ball");
        assert_eq!(slugify("  Overpass (Opp.) "), "overpass_opp");
        assert_eq!(slugify("3-Point Pass"), "custom_3_point_pass");
        assert_eq!(slugify("!!!"), "custom");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&StatCategory::Setting).unwrap();
        assert_eq!(json, "\"Setting\"");
    }
}
