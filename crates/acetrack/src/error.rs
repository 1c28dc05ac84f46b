//! Error types for acetrack.
//!
//! This module defines all error types used throughout the acetrack crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for acetrack operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Tracker Errors ===
    /// No event matched the given reference.
    #[error("no tournament matches '{0}'")]
    EventNotFound(String),

    /// No match matched the given reference within an event.
    #[error("no match matches '{0}'")]
    MatchNotFound(String),

    /// No set matched the given number or id within a match.
    #[error("set {0} does not exist")]
    SetNotFound(String),

    /// A reference matched more than one entity.
    #[error("'{reference}' is ambiguous: matches {candidates}")]
    AmbiguousReference {
        /// The reference as given by the user.
        reference: String,
        /// Human-readable list of the matching entities.
        candidates: String,
    },

    /// The stat id is not part of the catalog.
    #[error("unknown stat '{0}'")]
    UnknownStat(String),

    /// A custom stat would reuse an existing id.
    #[error("stat '{0}' already exists")]
    DuplicateStat(String),

    /// Built-in stats cannot be removed from the catalog.
    #[error("'{0}' is a built-in stat and cannot be removed")]
    BuiltInStat(String),

    /// Stats cannot be recorded into a completed set.
    #[error("set {0} is marked complete; reopen it before recording")]
    SetCompleted(u32),

    /// No set is currently selected for recording.
    #[error("no active set; run `acetrack set add` or `acetrack set select` first")]
    NoActiveSet,

    /// Input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // === Export Errors ===
    /// There is nothing to export.
    #[error("no stats recorded yet for {0}")]
    NothingToExport(String),

    // === Backup Errors ===
    /// The backup file does not have the expected shape.
    #[error("invalid backup file format: {0}")]
    InvalidBackup(String),

    /// The backup file could not be read or parsed.
    #[error("error reading backup file {path}: {message}")]
    BackupRead {
        /// Path of the backup file.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// No document has been saved yet.
    #[error("no data to back up")]
    NoData,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for acetrack operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new invalid backup error.
    #[must_use]
    pub fn invalid_backup(message: impl Into<String>) -> Self {
        Self::InvalidBackup(message.into())
    }

    /// Create an ambiguous reference error from the matching candidates.
    #[must_use]
    pub fn ambiguous<I, S>(reference: impl Into<String>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = candidates
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::AmbiguousReference {
            reference: reference.into(),
            candidates,
        }
    }

    /// Check if this error means a referenced entity does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::EventNotFound(_) | Self::MatchNotFound(_) | Self::SetNotFound(_)
        )
    }

    /// Check if this error was caused by bad user input rather than the environment.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        self.is_not_found()
            || matches!(
                self,
                Self::AmbiguousReference { .. }
                    | Self::UnknownStat(_)
                    | Self::DuplicateStat(_)
                    | Self::BuiltInStat(_)
                    | Self::SetCompleted(_)
                    | Self::NoActiveSet
                    | Self::InvalidInput(_)
            )
    }
}
