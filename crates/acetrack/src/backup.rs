//! Whole-document backup and restore.
//!
//! A backup is the tracker document serialized as pretty JSON. Restoring
//! accepts any JSON object carrying both a `profile` and an `events` key in
//! that same shape.

use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::info;

use crate::error::{Error, Result};
use crate::model::Tracker;

/// Default backup file name for a given day.
#[must_use]
pub fn backup_file_name(day: NaiveDate) -> String {
    format!("AceTrack_Full_Backup_{day}.json")
}

/// Write a backup of `tracker` to `path`.
///
/// # Errors
///
/// Returns an error if the document cannot be serialized or written.
pub fn write_backup(path: &Path, tracker: &Tracker) -> Result<()> {
    let body = serde_json::to_string_pretty(tracker)?;
    crate::export::write_report(path, &body)?;
    info!(
        "Backed up {} events to {}",
        tracker.events.len(),
        path.display()
    );
    Ok(())
}

/// Parse a backup from its JSON text.
///
/// # Errors
///
/// Returns [`Error::BackupRead`] if the text is not JSON and
/// [`Error::InvalidBackup`] if it is JSON of the wrong shape.
pub fn parse_backup(path: &Path, text: &str) -> Result<Tracker> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::BackupRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let Some(object) = value.as_object() else {
        return Err(Error::invalid_backup("expected a JSON object"));
    };
    for key in ["profile", "events"] {
        if object.get(key).map_or(true, Value::is_null) {
            return Err(Error::invalid_backup(format!("missing `{key}`")));
        }
    }

    serde_json::from_value(value).map_err(|e| Error::invalid_backup(e.to_string()))
}

/// Read a backup file.
///
/// # Errors
///
/// Returns [`Error::BackupRead`] if the file cannot be read or parsed and
/// [`Error::InvalidBackup`] if it is not a tracker document.
pub fn read_backup(path: &Path) -> Result<Tracker> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::BackupRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_backup(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::Profile;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn sample() -> Tracker {
        let mut tracker = Tracker::new(Profile::new("Sam", "7", "Libero"));
        let event_id = tracker.add_event("Spring Classic", "", day(), None).unwrap().id;
        let match_id = tracker.add_match(event_id, "Eagles", day()).unwrap().id;
        let path = tracker.add_set(event_id, match_id).unwrap();
        tracker.record_stat(&path, "dig", Utc::now()).unwrap();
        tracker
    }

    #[test]
    fn test_backup_file_name() {
        assert_eq!(backup_file_name(day()), "AceTrack_Full_Backup_2025-03-01.json");
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.json");
        let tracker = sample();

        write_backup(&path, &tracker).unwrap();
        assert_eq!(read_backup(&path).unwrap(), tracker);
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        let path = Path::new("b.json");
        let err = parse_backup(path, r#"{"profile": {}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(ref m) if m.contains("events")));

        let err = parse_backup(path, r#"{"events": [], "profile": null}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(ref m) if m.contains("profile")));

        let err = parse_backup(path, "[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(_)));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        let err = parse_backup(Path::new("b.json"), "{not json").unwrap_err();
        assert!(matches!(err, Error::BackupRead { .. }));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let err = parse_backup(Path::new("b.json"), r#"{"profile": 5, "events": []}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBackup(_)));
    }

    #[test]
    fn test_parse_document_from_older_app() {
        let text = r#"{
            "profile": {
                "name": "Sam",
                "number": "7",
                "position": "Libero",
                "trackedStats": ["kill", "dig"]
            },
            "events": [{
                "id": "2b0f6a1e-8c3d-4a5b-9e7f-1a2b3c4d5e6f",
                "name": "Spring Classic",
                "location": "Main Gym",
                "date": "2025-03-08",
                "matches": [{
                    "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                    "opponent": "Eagles",
                    "date": "3/8/2025",
                    "sets": [{
                        "id": "9f8e7d6c-5b4a-4321-8fed-cba987654321",
                        "setNumber": 1,
                        "logs": [{
                            "id": "0e1d2c3b-4a59-4687-9a0b-1c2d3e4f5a6b",
                            "statId": "kill",
                            "timestamp": 1741440000000,
                            "value": 1
                        }],
                        "isCompleted": false
                    }]
                }]
            }]
        }"#;

        let tracker = parse_backup(Path::new("old.json"), text).unwrap();
        let game = &tracker.events[0].matches[0];
        assert_eq!(game.date, NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        assert_eq!(game.sets[0].logs[0].stat_id, "kill");
        assert_eq!(tracker.log_count(), 1);
        assert_eq!(tracker.profile.tracked_stats, vec!["kill", "dig"]);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_backup(Path::new("/nonexistent/backup.json")).unwrap_err();
        assert!(matches!(err, Error::BackupRead { .. }));
    }
}
