//! The tracker document.
//!
//! All state lives in one [`Tracker`] value: the player profile plus a list of
//! events (tournaments), each owning matches, each owning sets, each owning an
//! append-only log of recorded plays. The document serializes to the same
//! camelCase JSON shape used by backups.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{self, default_aliases, Catalog, StatCategory, StatDefinition};
use crate::error::{Error, Result};

/// One recorded play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLog {
    /// Unique identifier of this entry.
    pub id: Uuid,
    /// Id of the metric in the catalog.
    pub stat_id: String,
    /// When the play was recorded, stored as milliseconds since the epoch.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// How many occurrences this entry counts for.
    #[serde(default = "default_log_value")]
    pub value: u32,
}

fn default_log_value() -> u32 {
    1
}

impl StatLog {
    /// Create a single-count entry for a metric.
    #[must_use]
    pub fn new(stat_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stat_id: stat_id.into(),
            timestamp,
            value: 1,
        }
    }
}

/// One set within a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSet {
    /// Unique identifier of the set.
    pub id: Uuid,
    /// 1-based ordinal within the match.
    pub set_number: u32,
    /// Recorded plays in the order they were logged.
    #[serde(default)]
    pub logs: Vec<StatLog>,
    /// Completed sets no longer accept new plays.
    #[serde(default)]
    pub is_completed: bool,
}

impl GameSet {
    fn new(set_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            set_number,
            logs: Vec::new(),
            is_completed: false,
        }
    }

    /// The most recently recorded play.
    #[must_use]
    pub fn last_log(&self) -> Option<&StatLog> {
        self.logs.last()
    }
}

/// A single game against one opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Unique identifier of the match.
    pub id: Uuid,
    /// Name of the opposing team.
    pub opponent: String,
    /// Day the match was played.
    #[serde(deserialize_with = "lenient_date::deserialize")]
    pub date: NaiveDate,
    /// Sets in play order.
    #[serde(default)]
    pub sets: Vec<GameSet>,
}

impl Match {
    /// Number of plays recorded across all sets.
    #[must_use]
    pub fn log_count(&self) -> usize {
        self.sets.iter().map(|s| s.logs.len()).sum()
    }

    /// Iterate over every recorded play in set order.
    pub fn logs(&self) -> impl Iterator<Item = &StatLog> {
        self.sets.iter().flat_map(|s| s.logs.iter())
    }
}

/// A tournament or other competition containing matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier of the event.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Venue, possibly empty.
    #[serde(default)]
    pub location: String,
    /// First day of the event.
    #[serde(default = "today", deserialize_with = "lenient_date::deserialize")]
    pub date: NaiveDate,
    /// Last day for multi-day events.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date::deserialize_option"
    )]
    pub end_date: Option<NaiveDate>,
    /// Matches in the order they were added.
    #[serde(default)]
    pub matches: Vec<Match>,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Date fields accept ISO dates as well as the `month/day/year` form found
/// in older backups. Dates are always written back as ISO.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer};

    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

    pub(super) fn parse(text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("unrecognized date '{text}'")))
    }

    /// Missing, null and blank values all mean no date.
    pub(super) fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => parse(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("unrecognized date '{text}'"))),
            _ => Ok(None),
        }
    }
}

impl Event {
    /// Number of plays recorded across all matches.
    #[must_use]
    pub fn log_count(&self) -> usize {
        self.matches.iter().map(Match::log_count).sum()
    }

    /// Whether anything has been recorded in this event.
    #[must_use]
    pub fn has_logs(&self) -> bool {
        self.log_count() > 0
    }

    /// Iterate over every recorded play in match then set order.
    pub fn logs(&self) -> impl Iterator<Item = &StatLog> {
        self.matches.iter().flat_map(Match::logs)
    }

    /// Human-readable date or date range.
    #[must_use]
    pub fn date_label(&self) -> String {
        match self.end_date {
            Some(end) if end != self.date => {
                format!("{} - {}", self.date.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            _ => self.date.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Player identity and tracking preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Player name.
    pub name: String,
    /// Jersey number.
    pub number: String,
    /// Court position.
    pub position: String,
    /// Ids of the metrics offered while tracking.
    pub tracked_stats: Vec<String>,
    /// Short labels for each category.
    #[serde(default = "default_aliases")]
    pub category_aliases: BTreeMap<StatCategory, String>,
    /// User-defined metrics appended to the catalog.
    #[serde(default)]
    pub custom_stats: Vec<StatDefinition>,
}

impl Profile {
    /// Create a profile tracking every built-in metric.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            position: position.into(),
            tracked_stats: catalog::builtin_stats().into_iter().map(|s| s.id).collect(),
            category_aliases: default_aliases(),
            custom_stats: Vec::new(),
        }
    }

    /// The full catalog for this profile.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.custom_stats)
    }

    /// Whether a metric is currently tracked.
    #[must_use]
    pub fn is_tracked(&self, id: &str) -> bool {
        self.tracked_stats.iter().any(|t| t == id)
    }

    /// Tracked metrics in catalog order.
    #[must_use]
    pub fn tracked(&self) -> Vec<StatDefinition> {
        self.catalog()
            .iter()
            .filter(|s| self.is_tracked(&s.id))
            .cloned()
            .collect()
    }

    /// Flip whether a metric is tracked. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not in the catalog.
    pub fn toggle_tracked(&mut self, id: &str) -> Result<bool> {
        let tracked = !self.is_tracked(id);
        self.set_tracked(id, tracked)?;
        Ok(tracked)
    }

    /// Start or stop tracking a metric. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not in the catalog.
    pub fn set_tracked(&mut self, id: &str, tracked: bool) -> Result<bool> {
        if !self.catalog().contains(id) {
            return Err(Error::UnknownStat(id.to_string()));
        }
        match (tracked, self.is_tracked(id)) {
            (true, false) => {
                self.tracked_stats.push(id.to_string());
                Ok(true)
            }
            (false, true) => {
                self.tracked_stats.retain(|t| t != id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Alias for a category, falling back to the default.
    #[must_use]
    pub fn alias(&self, category: StatCategory) -> &str {
        self.category_aliases
            .get(&category)
            .map_or(category.default_alias(), String::as_str)
    }

    /// Set the alias for a category. Stored uppercased and cut to two characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias is blank.
    pub fn set_alias(&mut self, category: StatCategory, value: &str) -> Result<&str> {
        let alias: String = value.trim().to_uppercase().chars().take(2).collect();
        if alias.is_empty() {
            return Err(Error::invalid_input("alias cannot be empty"));
        }
        let stored = self.category_aliases.entry(category).or_default();
        *stored = alias;
        Ok(stored.as_str())
    }

    /// Define a custom metric and start tracking it.
    ///
    /// The id is derived from the label when not given.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is blank, the id is malformed, or the id
    /// is already used by another metric.
    pub fn add_custom_stat(
        &mut self,
        label: &str,
        category: StatCategory,
        id: Option<&str>,
    ) -> Result<&StatDefinition> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::invalid_input("stat label cannot be empty"));
        }
        let id = id.map_or_else(|| catalog::slugify(label), str::to_string);
        catalog::validate_stat_id(&id)?;
        if self.catalog().contains(&id) {
            return Err(Error::DuplicateStat(id));
        }

        info!("Adding custom stat '{}' ({})", id, category);
        self.tracked_stats.push(id.clone());
        self.custom_stats
            .push(StatDefinition::new(id, label, category));
        let idx = self.custom_stats.len() - 1;
        Ok(&self.custom_stats[idx])
    }

    /// Remove a custom metric and stop tracking it.
    ///
    /// Logs already recorded against the metric are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is built in or unknown.
    pub fn remove_custom_stat(&mut self, id: &str) -> Result<StatDefinition> {
        if catalog::is_builtin(id) {
            return Err(Error::BuiltInStat(id.to_string()));
        }
        let idx = self
            .custom_stats
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::UnknownStat(id.to_string()))?;
        self.tracked_stats.retain(|t| t != id);
        info!("Removing custom stat '{}'", id);
        Ok(self.custom_stats.remove(idx))
    }
}

/// Fully qualified address of one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPath {
    /// Owning event.
    pub event_id: Uuid,
    /// Owning match.
    pub match_id: Uuid,
    /// The set itself.
    pub set_id: Uuid,
}

/// The active navigation path: which event, match and set commands act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Active event.
    pub event_id: Option<Uuid>,
    /// Active match within the event.
    pub match_id: Option<Uuid>,
    /// Active set within the match.
    pub set_id: Option<Uuid>,
}

impl Selection {
    /// Select a specific set.
    #[must_use]
    pub fn for_set(path: SetPath) -> Self {
        Self {
            event_id: Some(path.event_id),
            match_id: Some(path.match_id),
            set_id: Some(path.set_id),
        }
    }

    /// The selected set, if the selection goes that deep.
    #[must_use]
    pub fn set_path(&self) -> Option<SetPath> {
        Some(SetPath {
            event_id: self.event_id?,
            match_id: self.match_id?,
            set_id: self.set_id?,
        })
    }

    /// Drop any part of the selection that no longer exists in the document.
    #[must_use]
    pub fn prune(self, tracker: &Tracker) -> Self {
        let Some(event) = self.event_id.and_then(|id| tracker.event(id).ok()) else {
            return Self::default();
        };
        let Some(game) = self
            .match_id
            .and_then(|id| event.matches.iter().find(|m| m.id == id))
        else {
            return Self {
                event_id: Some(event.id),
                ..Self::default()
            };
        };
        let set_id = self
            .set_id
            .filter(|id| game.sets.iter().any(|s| s.id == *id));
        Self {
            event_id: Some(event.id),
            match_id: Some(game.id),
            set_id,
        }
    }
}

/// The whole tracker document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    /// Events, newest first.
    pub events: Vec<Event>,
    /// Player profile.
    pub profile: Profile,
}

impl Tracker {
    /// Create an empty document for a profile.
    #[must_use]
    pub fn new(profile: Profile) -> Self {
        Self {
            events: Vec::new(),
            profile,
        }
    }

    // === Events ===

    /// Create an event. New events are placed first.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the end date precedes the start date.
    pub fn add_event(
        &mut self,
        name: &str,
        location: &str,
        date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<&Event> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("tournament name cannot be empty"));
        }
        if let Some(end) = end_date {
            if end < date {
                return Err(Error::invalid_input(format!(
                    "end date {end} is before start date {date}"
                )));
            }
        }

        let event = Event {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: location.trim().to_string(),
            date,
            end_date,
            matches: Vec::new(),
        };
        info!("Created tournament '{}' ({})", event.name, event.id);
        self.events.insert(0, event);
        Ok(&self.events[0])
    }

    /// Remove an event together with all of its matches, sets and logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist.
    pub fn delete_event(&mut self, event_id: Uuid) -> Result<Event> {
        let idx = self.event_index(event_id)?;
        let event = self.events.remove(idx);
        info!(
            "Deleted tournament '{}' with {} matches and {} logs",
            event.name,
            event.matches.len(),
            event.log_count()
        );
        Ok(event)
    }

    /// Get an event by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist.
    pub fn event(&self, event_id: Uuid) -> Result<&Event> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::EventNotFound(event_id.to_string()))
    }

    fn event_mut(&mut self, event_id: Uuid) -> Result<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| Error::EventNotFound(event_id.to_string()))
    }

    fn event_index(&self, event_id: Uuid) -> Result<usize> {
        self.events
            .iter()
            .position(|e| e.id == event_id)
            .ok_or_else(|| Error::EventNotFound(event_id.to_string()))
    }

    /// Resolve a user-supplied event reference.
    ///
    /// The key is tried as a case-insensitive name, then as a 1-based position
    /// in the event list, then as an id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing matches or the key is ambiguous.
    pub fn find_event(&self, key: &str) -> Result<&Event> {
        let idx = resolve(
            &self.events,
            key,
            |e| e.name.as_str(),
            |e| e.id,
            Error::EventNotFound,
        )?;
        Ok(&self.events[idx])
    }

    // === Matches ===

    /// Add a match to an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or the opponent is blank.
    pub fn add_match(&mut self, event_id: Uuid, opponent: &str, date: NaiveDate) -> Result<&Match> {
        let opponent = opponent.trim();
        if opponent.is_empty() {
            return Err(Error::invalid_input("opponent cannot be empty"));
        }
        let event = self.event_mut(event_id)?;
        let game = Match {
            id: Uuid::new_v4(),
            opponent: opponent.to_string(),
            date,
            sets: Vec::new(),
        };
        info!("Added match vs {} to '{}'", game.opponent, event.name);
        event.matches.push(game);
        let idx = event.matches.len() - 1;
        Ok(&event.matches[idx])
    }

    /// Remove a match together with its sets and logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the event or match does not exist.
    pub fn delete_match(&mut self, event_id: Uuid, match_id: Uuid) -> Result<Match> {
        let event = self.event_mut(event_id)?;
        let idx = event
            .matches
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| Error::MatchNotFound(match_id.to_string()))?;
        let game = event.matches.remove(idx);
        info!(
            "Deleted match vs {} with {} sets",
            game.opponent,
            game.sets.len()
        );
        Ok(game)
    }

    /// Get a match by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the event or match does not exist.
    pub fn get_match(&self, event_id: Uuid, match_id: Uuid) -> Result<&Match> {
        self.event(event_id)?
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .ok_or_else(|| Error::MatchNotFound(match_id.to_string()))
    }

    fn get_match_mut(&mut self, event_id: Uuid, match_id: Uuid) -> Result<&mut Match> {
        self.event_mut(event_id)?
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or_else(|| Error::MatchNotFound(match_id.to_string()))
    }

    /// Resolve a user-supplied match reference within an event.
    ///
    /// The key is tried as a case-insensitive opponent name, then as a 1-based
    /// position, then as an id prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist, nothing matches, or the
    /// key is ambiguous.
    pub fn find_match(&self, event_id: Uuid, key: &str) -> Result<&Match> {
        let event = self.event(event_id)?;
        let idx = resolve(
            &event.matches,
            key,
            |m| m.opponent.as_str(),
            |m| m.id,
            Error::MatchNotFound,
        )?;
        Ok(&event.matches[idx])
    }

    // === Sets ===

    /// Start a new set in a match, numbered after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the event or match does not exist.
    pub fn add_set(&mut self, event_id: Uuid, match_id: Uuid) -> Result<SetPath> {
        let game = self.get_match_mut(event_id, match_id)?;
        let number = next_set_number(game);
        let set = GameSet::new(number);
        let path = SetPath {
            event_id,
            match_id,
            set_id: set.id,
        };
        info!("Started set {} vs {}", number, game.opponent);
        game.sets.push(set);
        Ok(path)
    }

    /// Remove a set and its logs, renumbering later sets to stay sequential.
    ///
    /// # Errors
    ///
    /// Returns an error if the set does not exist.
    pub fn delete_set(&mut self, path: &SetPath) -> Result<GameSet> {
        let game = self.get_match_mut(path.event_id, path.match_id)?;
        let idx = game
            .sets
            .iter()
            .position(|s| s.id == path.set_id)
            .ok_or_else(|| Error::SetNotFound(path.set_id.to_string()))?;
        let removed = game.sets.remove(idx);
        renumber_sets(game);
        info!(
            "Deleted set {} vs {} ({} logs)",
            removed.set_number,
            game.opponent,
            removed.logs.len()
        );
        Ok(removed)
    }

    /// Get a set by its full path.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the path does not exist.
    pub fn game_set(&self, path: &SetPath) -> Result<&GameSet> {
        self.get_match(path.event_id, path.match_id)?
            .sets
            .iter()
            .find(|s| s.id == path.set_id)
            .ok_or_else(|| Error::SetNotFound(path.set_id.to_string()))
    }

    fn game_set_mut(&mut self, path: &SetPath) -> Result<&mut GameSet> {
        self.get_match_mut(path.event_id, path.match_id)?
            .sets
            .iter_mut()
            .find(|s| s.id == path.set_id)
            .ok_or_else(|| Error::SetNotFound(path.set_id.to_string()))
    }

    /// Find a set by its number within a match.
    ///
    /// # Errors
    ///
    /// Returns an error if the match or set does not exist.
    pub fn find_set(&self, event_id: Uuid, match_id: Uuid, number: u32) -> Result<SetPath> {
        let set = self
            .get_match(event_id, match_id)?
            .sets
            .iter()
            .find(|s| s.set_number == number)
            .ok_or_else(|| Error::SetNotFound(number.to_string()))?;
        Ok(SetPath {
            event_id,
            match_id,
            set_id: set.id,
        })
    }

    /// Record one play into a set.
    ///
    /// # Errors
    ///
    /// Returns an error if the stat is not in the catalog, the set does not
    /// exist, or the set is completed.
    pub fn record_stat(
        &mut self,
        path: &SetPath,
        stat_id: &str,
        at: DateTime<Utc>,
    ) -> Result<&StatLog> {
        if !self.profile.catalog().contains(stat_id) {
            return Err(Error::UnknownStat(stat_id.to_string()));
        }
        let set = self.game_set_mut(path)?;
        if set.is_completed {
            return Err(Error::SetCompleted(set.set_number));
        }
        set.logs.push(StatLog::new(stat_id, at));
        debug!("Recorded {} in set {}", stat_id, set.set_number);
        let idx = set.logs.len() - 1;
        Ok(&set.logs[idx])
    }

    /// Remove the most recently recorded play from a set.
    ///
    /// Returns `None` when the set has no plays.
    ///
    /// # Errors
    ///
    /// Returns an error if the set does not exist.
    pub fn undo_last(&mut self, path: &SetPath) -> Result<Option<StatLog>> {
        let set = self.game_set_mut(path)?;
        let removed = set.logs.pop();
        if let Some(log) = &removed {
            debug!("Undid {} in set {}", log.stat_id, set.set_number);
        }
        Ok(removed)
    }

    /// Flip the completion flag of a set. Returns the new state.
    ///
    /// # Errors
    ///
    /// Returns an error if the set does not exist.
    pub fn toggle_set_complete(&mut self, path: &SetPath) -> Result<bool> {
        let set = self.game_set_mut(path)?;
        set.is_completed = !set.is_completed;
        info!(
            "Set {} marked {}",
            set.set_number,
            if set.is_completed { "complete" } else { "open" }
        );
        Ok(set.is_completed)
    }

    // === Totals ===

    /// Number of matches across all events.
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.events.iter().map(|e| e.matches.len()).sum()
    }

    /// Number of sets across all events.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.events
            .iter()
            .flat_map(|e| e.matches.iter())
            .map(|m| m.sets.len())
            .sum()
    }

    /// Number of recorded plays across all events.
    #[must_use]
    pub fn log_count(&self) -> usize {
        self.events.iter().map(Event::log_count).sum()
    }
}

fn next_set_number(game: &Match) -> u32 {
    u32::try_from(game.sets.len()).map_or(u32::MAX, |n| n.saturating_add(1))
}

fn renumber_sets(game: &mut Match) {
    for (number, set) in (1u32..).zip(game.sets.iter_mut()) {
        set.set_number = number;
    }
}

/// Resolve a key to an index by name, then position, then id prefix.
fn resolve<T>(
    items: &[T],
    key: &str,
    name: impl Fn(&T) -> &str,
    id: impl Fn(&T) -> Uuid,
    not_found: impl FnOnce(String) -> Error,
) -> Result<usize> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::invalid_input("reference cannot be empty"));
    }

    let by_name: Vec<usize> = (0..items.len())
        .filter(|&i| name(&items[i]).eq_ignore_ascii_case(key))
        .collect();
    match by_name.as_slice() {
        [idx] => return Ok(*idx),
        [] => {}
        many => {
            return Err(Error::ambiguous(
                key,
                many.iter().map(|&i| id(&items[i]).to_string()),
            ))
        }
    }

    if let Ok(position) = key.parse::<usize>() {
        if (1..=items.len()).contains(&position) {
            return Ok(position - 1);
        }
    }

    let prefix = key.to_ascii_lowercase();
    let by_id: Vec<usize> = (0..items.len())
        .filter(|&i| id(&items[i]).to_string().starts_with(&prefix))
        .collect();
    match by_id.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(not_found(key.to_string())),
        many => Err(Error::ambiguous(
            key,
            many.iter().map(|&i| name(&items[i]).to_string()),
        )),
    }
}
