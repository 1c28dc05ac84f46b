//! `SQLite` schema definitions for acetrack.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the documents table.
///
/// The tracker document is stored whole, as JSON, under a fixed key.
pub const CREATE_DOCUMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY,
    body TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_DOCUMENTS_TABLE, CREATE_METADATA_TABLE];
