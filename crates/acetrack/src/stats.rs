//! Statistics rollups.
//!
//! Totals are per-stat sums of log values over a set, a match or a whole
//! event. Derived metrics (hitting percentage, serve percentage) and the
//! per-category breakdown are computed from those totals.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::{ids, Catalog, StatCategory, StatDefinition, CATEGORY_ORDER};
use crate::model::{Event, GameSet, Match, StatLog};

/// Per-stat totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatTotals {
    counts: HashMap<String, u64>,
}

impl StatTotals {
    /// Sum the values of the given logs per stat id.
    pub fn from_logs<'a>(logs: impl IntoIterator<Item = &'a StatLog>) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for log in logs {
            *counts.entry(log.stat_id.clone()).or_default() += u64::from(log.value);
        }
        Self { counts }
    }

    /// Totals for one set.
    #[must_use]
    pub fn for_set(set: &GameSet) -> Self {
        Self::from_logs(&set.logs)
    }

    /// Totals across every set of a match.
    #[must_use]
    pub fn for_match(game: &Match) -> Self {
        Self::from_logs(game.logs())
    }

    /// Totals across every match of an event.
    #[must_use]
    pub fn for_event(event: &Event) -> Self {
        Self::from_logs(event.logs())
    }

    /// Total for a single stat, zero when never recorded.
    #[must_use]
    pub fn get(&self, stat_id: &str) -> u64 {
        self.counts.get(stat_id).copied().unwrap_or(0)
    }

    /// Sum of all recorded values.
    #[must_use]
    pub fn grand_total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grand_total() == 0
    }

    /// Breakdown by category in display order, skipping zero totals.
    #[must_use]
    pub fn by_category(&self, catalog: &Catalog) -> Vec<CategoryTotals> {
        CATEGORY_ORDER
            .into_iter()
            .filter_map(|category| {
                let entries: Vec<StatTotal> = catalog
                    .by_category(category)
                    .filter_map(|stat| {
                        let total = self.get(&stat.id);
                        (total > 0).then(|| StatTotal {
                            stat: stat.clone(),
                            total,
                        })
                    })
                    .collect();
                (!entries.is_empty()).then_some(CategoryTotals { category, entries })
            })
            .collect()
    }

    /// Catalog stats with a non-zero total, in catalog order.
    #[must_use]
    pub fn nonzero<'a>(&self, catalog: &'a Catalog) -> Vec<(&'a StatDefinition, u64)> {
        catalog
            .iter()
            .map(|stat| (stat, self.get(&stat.id)))
            .filter(|&(_, total)| total > 0)
            .collect()
    }
}

/// One stat and its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTotal {
    /// The stat definition.
    pub stat: StatDefinition,
    /// Summed value.
    pub total: u64,
}

/// Non-zero totals within one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    /// The category.
    pub category: StatCategory,
    /// Stats in catalog order.
    pub entries: Vec<StatTotal>,
}

/// Attacking efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttackEfficiency {
    /// Kills.
    pub kills: u64,
    /// Attack errors.
    pub attack_errors: u64,
    /// Attacks kept in play (in play, roll shots and tips).
    pub attempts: u64,
    /// All swings: kills, errors and attempts.
    pub total_attacks: u64,
    /// `(kills - errors) / total_attacks`, or 0 with no attacks.
    pub hitting_percentage: f64,
}

impl AttackEfficiency {
    /// Compute attacking efficiency from totals.
    #[must_use]
    pub fn from_totals(totals: &StatTotals) -> Self {
        let kills = totals.get(ids::KILL);
        let attack_errors = totals.get(ids::ATTACK_ERROR);
        let attempts = totals.get(ids::ATTACK_ATTEMPT)
            + totals.get(ids::ATTACK_ROLL)
            + totals.get(ids::ATTACK_TIP);
        let total_attacks = kills + attack_errors + attempts;
        Self {
            kills,
            attack_errors,
            attempts,
            total_attacks,
            hitting_percentage: hitting_percentage(kills, attack_errors, total_attacks),
        }
    }
}

/// Serving efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServeEfficiency {
    /// Aces.
    pub aces: u64,
    /// Missed serves.
    pub errors: u64,
    /// Serves kept in play.
    pub in_play: u64,
    /// All serves.
    pub total_serves: u64,
    /// Share of serves that were not errors, or 0 with no serves.
    pub serve_percentage: f64,
}

impl ServeEfficiency {
    /// Compute serving efficiency from totals.
    #[must_use]
    pub fn from_totals(totals: &StatTotals) -> Self {
        let aces = totals.get(ids::ACE);
        let errors = totals.get(ids::SERVE_ERROR);
        let in_play = totals.get(ids::SERVE_IN);
        let total_serves = aces + errors + in_play;
        Self {
            aces,
            errors,
            in_play,
            total_serves,
            serve_percentage: ratio(aces + in_play, total_serves),
        }
    }
}

/// Headline numbers for a match or tournament.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Kills.
    pub kills: u64,
    /// Aces.
    pub aces: u64,
    /// Solo plus assisted blocks.
    pub blocks: u64,
    /// Digs.
    pub digs: u64,
    /// Attacking efficiency.
    pub attack: AttackEfficiency,
    /// Serving efficiency.
    pub serve: ServeEfficiency,
}

impl Summary {
    /// Summarize totals.
    #[must_use]
    pub fn from_totals(totals: &StatTotals) -> Self {
        Self {
            kills: totals.get(ids::KILL),
            aces: totals.get(ids::ACE),
            blocks: totals.get(ids::BLOCK_SOLO) + totals.get(ids::BLOCK_ASSIST),
            digs: totals.get(ids::DIG),
            attack: AttackEfficiency::from_totals(totals),
            serve: ServeEfficiency::from_totals(totals),
        }
    }
}

/// Hitting percentage, clamped to zero when there were no attacks.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn hitting_percentage(kills: u64, errors: u64, total_attacks: u64) -> f64 {
    if total_attacks == 0 {
        return 0.0;
    }
    (kills as f64 - errors as f64) / total_attacks as f64
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Format an efficiency in volleyball style: three decimals, no leading zero.
///
/// `0.25` becomes `.250`, `-0.1` becomes `-.100`, `1.0` stays `1.000`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    let formatted = format!("{value:.3}");
    if let Some(rest) = formatted.strip_prefix("-0.") {
        if rest.chars().all(|c| c == '0') {
            format!(".{rest}")
        } else {
            format!("-.{rest}")
        }
    } else if let Some(rest) = formatted.strip_prefix("0.") {
        format!(".{rest}")
    } else {
        formatted
    }
}
