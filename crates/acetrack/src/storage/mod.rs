//! Storage layer for acetrack.
//!
//! This module provides `SQLite`-based persistent storage for the tracker
//! document and the active selection. The document is kept whole, as JSON,
//! and only rewritten when its content hash changes.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{Selection, Tracker};

/// Key the tracker document is stored under.
const DOCUMENT_KEY: &str = "current";

/// Metadata key holding the active selection.
const SELECTION_KEY: &str = "selection";

/// Storage engine for the tracker document.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        debug!("Database ready at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored document, if one has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored body is not a valid document.
    pub fn load(&self) -> Result<Option<Tracker>> {
        let body: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents WHERE key = ?1",
                [DOCUMENT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        body.map(|body| serde_json::from_str(&body).map_err(Error::from))
            .transpose()
    }

    /// Save the document.
    ///
    /// Returns `false` when the stored body already has the same content, in
    /// which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save(&self, tracker: &Tracker) -> Result<bool> {
        write_document(&self.conn, tracker)
    }

    /// Save the document and the active selection in one transaction.
    ///
    /// Returns whether the document itself was rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or either write fails, in which case
    /// neither is applied.
    pub fn save_with_selection(&self, tracker: &Tracker, selection: &Selection) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let written = write_document(&tx, tracker)?;
        write_selection(&tx, selection)?;
        tx.commit()?;
        Ok(written)
    }

    /// Check whether a document has been saved, without parsing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_document(&self) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM documents WHERE key = ?1",
                [DOCUMENT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Remove the stored document and the active selection.
    ///
    /// Returns `true` if a document was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn clear(&self) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM documents WHERE key = ?1", [DOCUMENT_KEY])?;
        tx.execute("DELETE FROM metadata WHERE key = ?1", [SELECTION_KEY])?;
        tx.commit()?;

        info!("Cleared stored document");
        Ok(removed > 0)
    }

    /// Get the active selection. Defaults to nothing selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored value is malformed.
    pub fn selection(&self) -> Result<Selection> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM metadata WHERE key = ?1",
                [SELECTION_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(serde_json::from_str(&value)?),
            None => Ok(Selection::default()),
        }
    }

    /// Persist the active selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub fn set_selection(&self, selection: &Selection) -> Result<()> {
        write_selection(&self.conn, selection)
    }

    /// Get storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT length(CAST(body AS BLOB)), updated_at FROM documents WHERE key = ?1",
                [DOCUMENT_KEY],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (document_bytes, saved_at) = match row {
            Some((len, updated_at)) => (
                u64::try_from(len).unwrap_or(0),
                DateTime::parse_from_rfc3339(&updated_at)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
            ),
            None => (0, None),
        };

        let counts = self.load()?.map_or_else(DocumentCounts::default, |t| {
            DocumentCounts {
                events: t.events.len(),
                matches: t.match_count(),
                sets: t.set_count(),
                logs: t.log_count(),
            }
        });

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            counts,
            document_bytes,
            db_size_bytes,
            saved_at,
        })
    }
}

fn write_document(conn: &Connection, tracker: &Tracker) -> Result<bool> {
    let body = serde_json::to_string(tracker)?;
    let hash = blake3::hash(body.as_bytes()).to_hex().to_string();

    let existing: Option<String> = conn
        .query_row(
            "SELECT content_hash FROM documents WHERE key = ?1",
            [DOCUMENT_KEY],
            |row| row.get(0),
        )
        .optional()?;
    if existing.as_deref() == Some(hash.as_str()) {
        debug!("Document unchanged ({}), skipping save", &hash[..16]);
        return Ok(false);
    }

    conn.execute(
        r"
        INSERT OR REPLACE INTO documents (key, body, content_hash, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ",
        params![DOCUMENT_KEY, body, hash, Utc::now().to_rfc3339()],
    )?;

    debug!("Saved document ({} bytes)", body.len());
    Ok(true)
}

fn write_selection(conn: &Connection, selection: &Selection) -> Result<()> {
    let value = serde_json::to_string(selection)?;
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (SELECTION_KEY, value),
    )?;
    Ok(())
}

/// Entity counts in the stored document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentCounts {
    /// Number of events.
    pub events: usize,
    /// Number of matches across all events.
    pub matches: usize,
    /// Number of sets across all matches.
    pub sets: usize,
    /// Number of recorded plays.
    pub logs: usize,
}

/// Statistics about the storage database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Entity counts.
    pub counts: DocumentCounts,
    /// Size of the serialized document in bytes.
    pub document_bytes: u64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
    /// When the document was last written.
    pub saved_at: Option<DateTime<Utc>>,
}
