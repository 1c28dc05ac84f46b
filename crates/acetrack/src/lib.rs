//! `acetrack` - A local-first volleyball statistics tracker
//!
//! This library provides the tracker document (profile, events, matches,
//! sets and recorded plays), the statistics rollups computed from it, CSV
//! reports, JSON backups, and the `SQLite` storage that keeps it all on disk.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod backup;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod session;
pub mod stats;
pub mod storage;

pub use catalog::{Catalog, StatCategory, StatDefinition};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Event, GameSet, Match, Profile, Selection, SetPath, StatLog, Tracker};
pub use session::Session;
pub use stats::{StatTotals, Summary};
pub use storage::{Storage, StorageStats};
