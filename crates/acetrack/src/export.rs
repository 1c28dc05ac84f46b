//! CSV report generation.
//!
//! Every field is double-quoted with embedded quotes doubled, and rows are
//! joined with `\n`. A match report lists every play of one match; a
//! tournament report lists every play of every match followed by a totals
//! section.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Local, NaiveDate, Utc};
use regex::Regex;
use tracing::info;

use crate::catalog::Catalog;
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::model::{Event, Match};
use crate::stats::StatTotals;

/// Header of the per-match report.
pub const MATCH_HEADERS: [&str; 4] = ["Set", "Category", "Metric", "Timestamp"];

/// Header of the tournament report.
pub const TOURNAMENT_HEADERS: [&str; 6] = ["Match", "Date", "Set", "Category", "Metric", "Timestamp"];

/// How timestamps are rendered in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampStyle {
    /// strftime format string.
    pub format: String,
    /// Render in local time instead of UTC.
    pub local: bool,
}

impl Default for TimestampStyle {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for TimestampStyle {
    fn from(config: &ExportConfig) -> Self {
        Self {
            format: config.timestamp_format.clone(),
            local: config.local_time,
        }
    }
}

impl TimestampStyle {
    /// Render a timestamp.
    #[must_use]
    pub fn render(&self, at: DateTime<Utc>) -> String {
        if self.local {
            at.with_timezone(&Local).format(&self.format).to_string()
        } else {
            at.format(&self.format).to_string()
        }
    }
}

/// Quote a CSV field.
#[must_use]
pub fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row<S: AsRef<str>>(fields: impl IntoIterator<Item = S>) -> String {
    fields
        .into_iter()
        .map(|f| csv_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the report for a single match.
///
/// Stats missing from the catalog are reported under `Other` with their raw id.
#[must_use]
pub fn match_report(game: &Match, catalog: &Catalog, style: &TimestampStyle) -> String {
    let mut rows = vec![MATCH_HEADERS.join(",")];
    for set in &game.sets {
        let set_label = format!("Set {}", set.set_number);
        for log in &set.logs {
            rows.push(csv_row([
                set_label.as_str(),
                catalog.category_name_for(&log.stat_id),
                catalog.label_for(&log.stat_id),
                style.render(log.timestamp).as_str(),
            ]));
        }
    }
    rows.join("\n")
}

/// Build the full tournament report.
///
/// # Errors
///
/// Returns an error if nothing has been recorded in the event.
pub fn tournament_report(event: &Event, catalog: &Catalog, style: &TimestampStyle) -> Result<String> {
    if !event.has_logs() {
        return Err(Error::NothingToExport(event.name.clone()));
    }

    let mut rows = vec![TOURNAMENT_HEADERS.join(",")];
    for game in &event.matches {
        let date = game.date.to_string();
        for set in &game.sets {
            let set_label = format!("Set {}", set.set_number);
            for log in &set.logs {
                rows.push(csv_row([
                    game.opponent.as_str(),
                    date.as_str(),
                    set_label.as_str(),
                    catalog.category_name_for(&log.stat_id),
                    catalog.label_for(&log.stat_id),
                    style.render(log.timestamp).as_str(),
                ]));
            }
        }
    }

    rows.push(csv_row([""; 6]));
    rows.push(csv_row(["TOURNAMENT TOTALS", "", "", "", "", ""]));
    let totals = StatTotals::for_event(event);
    for (stat, total) in totals.nonzero(catalog) {
        rows.push(csv_row([
            "Tournament Total",
            "",
            "",
            stat.category.as_str(),
            stat.label.as_str(),
            total.to_string().as_str(),
        ]));
    }

    Ok(rows.join("\n"))
}

fn whitespace_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn file_safe(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    whitespace_pattern().replace_all(&cleaned, "_").into_owned()
}

/// Default file name of a tournament report.
#[must_use]
pub fn tournament_file_name(event: &Event) -> String {
    format!("AceTrack_{}_Full_Report.csv", file_safe(&event.name))
}

/// Default file name of a match report exported on `day`.
#[must_use]
pub fn match_file_name(game: &Match, day: NaiveDate) -> String {
    format!("AceTrack_vs_{}_{}.csv", file_safe(&game.opponent), day)
}

/// Write a report, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_report(path: &Path, contents: &str) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    std::fs::write(path, contents)?;
    info!("Wrote report to {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::model::{Profile, Tracker};

    fn utc_style() -> TimestampStyle {
        TimestampStyle {
            format: "%Y-%m-%d %H:%M:%S".to_string(),
            local: false,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn populated() -> (Tracker, uuid::Uuid) {
        let mut t = Tracker::new(Profile::new("Sam", "7", "OH"));
        let event_id = t.add_event("Spring Classic", "", day(), None).unwrap().id;
        let eagles = t.add_match(event_id, "Eagles", day()).unwrap().id;
        let hawks = t.add_match(event_id, "Hawks \"B\"", day()).unwrap().id;

        let s1 = t.add_set(event_id, eagles).unwrap();
        t.record_stat(&s1, "kill", at(0)).unwrap();
        t.record_stat(&s1, "ace", at(1)).unwrap();
        let s2 = t.add_set(event_id, eagles).unwrap();
        t.record_stat(&s2, "kill", at(2)).unwrap();
        let h1 = t.add_set(event_id, hawks).unwrap();
        t.record_stat(&h1, "dig", at(3)).unwrap();
        (t, event_id)
    }

    #[test]
    fn test_csv_field_quotes() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field(""), "\"\"");
    }

    #[test]
    fn test_match_report_rows() {
        let (t, event_id) = populated();
        let event = t.event(event_id).unwrap();
        let report = match_report(&event.matches[0], &t.profile.catalog(), &utc_style());
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines[0], "Set,Category,Metric,Timestamp");
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[1],
            "\"Set 1\",\"Attacking\",\"Kill\",\"2023-11-14 22:13:20\""
        );
        assert!(lines[3].starts_with("\"Set 2\""));
    }

    #[test]
    fn test_match_report_unknown_stat() {
        let (mut t, event_id) = populated();
        t.events[0].matches[0].sets[0].logs[0].stat_id = "retired".to_string();
        let report = match_report(
            &t.event(event_id).unwrap().matches[0],
            &t.profile.catalog(),
            &utc_style(),
        );
        assert!(report.contains("\"Other\",\"retired\""));
    }

    #[test]
    fn test_tournament_row_count_matches_logs() {
        let (t, event_id) = populated();
        let event = t.event(event_id).unwrap();
        let report = tournament_report(event, &t.profile.catalog(), &utc_style()).unwrap();
        let data_rows = report
            .lines()
            .skip(1)
            .take_while(|line| !line.starts_with("\"\","))
            .count();
        assert_eq!(data_rows, event.log_count());
        assert_eq!(data_rows, 4);
    }

    #[test]
    fn test_tournament_report_totals_section() {
        let (t, event_id) = populated();
        let event = t.event(event_id).unwrap();
        let report = tournament_report(event, &t.profile.catalog(), &utc_style()).unwrap();
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines[0], "Match,Date,Set,Category,Metric,Timestamp");
        assert!(lines[4].starts_with("\"Hawks \"\"B\"\"\",\"2025-03-01\",\"Set 1\""));
        assert_eq!(lines[5], "\"\",\"\",\"\",\"\",\"\",\"\"");
        assert_eq!(lines[6], "\"TOURNAMENT TOTALS\",\"\",\"\",\"\",\"\",\"\"");
        assert_eq!(
            &lines[7..],
            &[
                "\"Tournament Total\",\"\",\"\",\"Attacking\",\"Kill\",\"2\"",
                "\"Tournament Total\",\"\",\"\",\"Serving\",\"Ace\",\"1\"",
                "\"Tournament Total\",\"\",\"\",\"Defense\",\"Dig\",\"1\"",
            ]
        );
    }

    #[test]
    fn test_tournament_report_empty() {
        let mut t = Tracker::new(Profile::new("Sam", "7", "OH"));
        let event_id = t.add_event("Quiet Cup", "", day(), None).unwrap().id;
        let err = tournament_report(t.event(event_id).unwrap(), &t.profile.catalog(), &utc_style())
            .unwrap_err();
        assert!(matches!(err, Error::NothingToExport(_)));
    }

    #[test]
    fn test_file_names() {
        let (t, event_id) = populated();
        let event = t.event(event_id).unwrap();
        assert_eq!(
            tournament_file_name(event),
            "AceTrack_Spring_Classic_Full_Report.csv"
        );
        assert_eq!(
            match_file_name(&event.matches[1], day()),
            "AceTrack_vs_Hawks_B_2025-03-01.csv"
        );
    }

    #[test]
    fn test_write_report_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/out.csv");
        let written = write_report(&path, "a,b").unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), "a,b");
    }
}
