//! A loaded tracker document bound to its storage.
//!
//! Commands open a [`Session`], read or mutate [`Session::tracker`] and the
//! active [`Selection`], then [`Session::commit`] to persist the result.

use tracing::{debug, warn};

use crate::config::{Config, ProfileConfig};
use crate::error::{Error, Result};
use crate::model::{Selection, SetPath, Tracker};
use crate::storage::Storage;

/// The working copy of the document.
#[derive(Debug)]
pub struct Session {
    storage: Storage,
    /// Whether a document existed in storage when the session was opened.
    stored: bool,
    /// The document.
    pub tracker: Tracker,
    /// The active event, match and set.
    pub selection: Selection,
}

impl Session {
    /// Open the database configured in `config` and load its document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or read.
    pub fn open(config: &Config) -> Result<Self> {
        let storage = Storage::open(config.database_path())?;
        Self::with_storage(storage, &config.profile)
    }

    /// Load the document from an already opened storage.
    ///
    /// An empty database yields a fresh document seeded from `profile`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document or selection cannot be read.
    pub fn with_storage(storage: Storage, profile: &ProfileConfig) -> Result<Self> {
        let loaded = storage.load()?;
        let selection = storage.selection()?;
        Ok(Self::from_parts(storage, loaded, selection, profile))
    }

    /// Open the configured database for a command that replaces or removes
    /// the whole document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or queried.
    pub fn open_recovering(config: &Config) -> Result<Self> {
        let storage = Storage::open(config.database_path())?;
        Self::recover(storage, &config.profile)
    }

    /// Load the document, starting fresh if the stored body or selection
    /// cannot be parsed.
    ///
    /// The unreadable document still counts as stored so that it can be
    /// cleared or overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the database itself cannot be queried.
    pub fn recover(storage: Storage, profile: &ProfileConfig) -> Result<Self> {
        let loaded = match storage.load() {
            Ok(loaded) => loaded,
            Err(Error::Json(err)) => {
                warn!("Stored document is unreadable, ignoring it: {}", err);
                None
            }
            Err(err) => return Err(err),
        };
        let selection = match storage.selection() {
            Ok(selection) => selection,
            Err(Error::Json(err)) => {
                warn!("Stored selection is unreadable, ignoring it: {}", err);
                Selection::default()
            }
            Err(err) => return Err(err),
        };
        let mut session = Self::from_parts(storage, loaded, selection, profile);
        session.stored = session.storage.has_document()?;
        Ok(session)
    }

    fn from_parts(
        storage: Storage,
        loaded: Option<Tracker>,
        selection: Selection,
        profile: &ProfileConfig,
    ) -> Self {
        let stored = loaded.is_some();
        let tracker = loaded.unwrap_or_else(|| {
            debug!("No stored document, starting fresh for '{}'", profile.name);
            Tracker::new(profile.to_profile())
        });
        let selection = selection.prune(&tracker);

        Self {
            storage,
            stored,
            tracker,
            selection,
        }
    }

    /// The underlying storage.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Whether any document has been saved yet.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        self.stored
    }

    /// The selected set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSet`] when no set is selected.
    pub fn active_set(&self) -> Result<SetPath> {
        self.selection.set_path().ok_or(Error::NoActiveSet)
    }

    /// Replace the whole document, as when restoring a backup.
    pub fn replace(&mut self, tracker: Tracker) {
        self.tracker = tracker;
        self.selection = Selection::default();
    }

    /// Persist the document and the selection.
    ///
    /// Parts of the selection that no longer exist are dropped first.
    /// Returns whether the document itself was rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn commit(&mut self) -> Result<bool> {
        self.selection = self.selection.prune(&self.tracker);
        let written = self
            .storage
            .save_with_selection(&self.tracker, &self.selection)?;
        self.stored = true;
        Ok(written)
    }

    /// Remove everything from storage and start over with a fresh profile.
    ///
    /// Returns whether a stored document was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn reset(&mut self, profile: &ProfileConfig) -> Result<bool> {
        let removed = self.storage.clear()?;
        self.tracker = Tracker::new(profile.to_profile());
        self.selection = Selection::default();
        self.stored = false;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn session() -> Session {
        let storage = Storage::open_in_memory().unwrap();
        Session::with_storage(storage, &ProfileConfig::default()).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_fresh_session_is_seeded() {
        let session = session();
        assert!(!session.is_stored());
        assert_eq!(session.tracker.profile.name, "My Player");
        assert!(session.tracker.events.is_empty());
        assert!(matches!(session.active_set(), Err(Error::NoActiveSet)));
    }

    #[test]
    fn test_commit_persists_document_and_selection() {
        let mut session = session();
        let event_id = session.tracker.add_event("Cup", "", day(), None).unwrap().id;
        let match_id = session.tracker.add_match(event_id, "Eagles", day()).unwrap().id;
        let path = session.tracker.add_set(event_id, match_id).unwrap();
        session.selection = Selection::for_set(path);

        assert!(session.commit().unwrap());
        assert!(!session.commit().unwrap());
        assert!(session.is_stored());

        assert_eq!(session.storage().load().unwrap().unwrap(), session.tracker);
        assert_eq!(session.storage().selection().unwrap(), Selection::for_set(path));
    }

    #[test]
    fn test_commit_prunes_deleted_selection() {
        let mut session = session();
        let event_id = session.tracker.add_event("Cup", "", day(), None).unwrap().id;
        let match_id = session.tracker.add_match(event_id, "Eagles", day()).unwrap().id;
        let path = session.tracker.add_set(event_id, match_id).unwrap();
        session.selection = Selection::for_set(path);

        session.tracker.delete_match(event_id, match_id).unwrap();
        session.commit().unwrap();

        assert_eq!(session.selection.event_id, Some(event_id));
        assert!(session.selection.match_id.is_none());
        assert!(session.selection.set_id.is_none());
    }

    #[test]
    fn test_active_set_records() {
        let mut session = session();
        let event_id = session.tracker.add_event("Cup", "", day(), None).unwrap().id;
        let match_id = session.tracker.add_match(event_id, "Eagles", day()).unwrap().id;
        let path = session.tracker.add_set(event_id, match_id).unwrap();
        session.selection = Selection::for_set(path);

        let active = session.active_set().unwrap();
        session.tracker.record_stat(&active, "kill", Utc::now()).unwrap();
        assert_eq!(session.tracker.log_count(), 1);
    }

    #[test]
    fn test_replace_and_reset() {
        let mut session = session();
        let mut other = Tracker::new(ProfileConfig::default().to_profile());
        other.add_event("Restored", "", day(), None).unwrap();
        session.replace(other.clone());
        session.commit().unwrap();
        assert_eq!(session.storage().load().unwrap().unwrap(), other);

        assert!(session.reset(&ProfileConfig::default()).unwrap());
        assert!(!session.is_stored());
        assert!(session.tracker.events.is_empty());
        assert!(session.storage().load().unwrap().is_none());
    }

    fn corrupt_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acetrack.db");
        drop(Storage::open(&path).unwrap());

        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO documents (key, body, content_hash, updated_at) VALUES ('current', '{\"events\": 3}', 'x', 'y')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO metadata (key, value) VALUES ('selection', 'not json')",
            [],
        )
        .unwrap();
        drop(conn);

        let storage = Storage::open(&path).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_unreadable_document_fails_normal_open() {
        let (_dir, storage) = corrupt_storage();
        let err = Session::with_storage(storage, &ProfileConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_recover_from_unreadable_document() {
        let (_dir, storage) = corrupt_storage();
        let mut session = Session::recover(storage, &ProfileConfig::default()).unwrap();
        assert!(session.is_stored());
        assert!(session.tracker.events.is_empty());
        assert_eq!(session.selection, Selection::default());

        assert!(session.reset(&ProfileConfig::default()).unwrap());
        assert!(session.storage().load().unwrap().is_none());
        assert_eq!(session.storage().selection().unwrap(), Selection::default());
    }

    #[test]
    fn test_recover_then_overwrite() {
        let (_dir, storage) = corrupt_storage();
        let mut session = Session::recover(storage, &ProfileConfig::default()).unwrap();
        let mut restored = Tracker::new(ProfileConfig::default().to_profile());
        restored.add_event("Restored", "", day(), None).unwrap();
        session.replace(restored.clone());
        session.commit().unwrap();

        assert_eq!(session.storage().load().unwrap().unwrap(), restored);
    }

    #[test]
    fn test_recover_keeps_readable_document() {
        let mut tracker = Tracker::new(ProfileConfig::default().to_profile());
        tracker.add_event("Cup", "", day(), None).unwrap();

        let storage = Storage::open_in_memory().unwrap();
        storage.save(&tracker).unwrap();
        let recovered = Session::recover(storage, &ProfileConfig::default()).unwrap();
        assert!(recovered.is_stored());
        assert_eq!(recovered.tracker, tracker);
    }
}
