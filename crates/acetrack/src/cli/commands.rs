//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands. Events and
//! matches are referenced by name, by 1-based position in their listing, or
//! by an id prefix.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::catalog::StatCategory;

/// Event (tournament) commands.
#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Create an event
    Add {
        /// Event name
        name: String,

        /// Where the event takes place
        #[arg(short, long, default_value = "")]
        location: String,

        /// First day (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Last day of a multi-day event (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },

    /// List events, newest first
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show an event with its matches
    Show {
        /// Event name, position or id
        event: String,
    },

    /// Delete an event with all of its matches and sets
    Delete {
        /// Event name, position or id
        event: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Match commands.
#[derive(Debug, Subcommand)]
pub enum MatchCommand {
    /// Add a match to an event
    Add {
        /// Event name, position or id
        event: String,

        /// Opponent name
        opponent: String,

        /// Match day (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List the matches of an event
    List {
        /// Event name, position or id
        event: String,
    },

    /// Show a match with its per-set totals
    Show {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,
    },

    /// Delete a match with all of its sets
    Delete {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Write the match report as CSV
    Export {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,

        /// Output file (defaults to a generated name in the output directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Set commands.
#[derive(Debug, Subcommand)]
pub enum SetCommand {
    /// Start the next set of a match and make it active
    Add {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,
    },

    /// List the sets of a match
    List {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,
    },

    /// Make a set the active one
    Select {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,

        /// Set number
        number: u32,
    },

    /// Mark the active set complete, or reopen it if already complete
    Complete,

    /// Delete a set; later sets are renumbered
    Delete {
        /// Event name, position or id
        event: String,

        /// Opponent name, position or id
        #[arg(value_name = "MATCH")]
        game: String,

        /// Set number
        number: u32,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Log command arguments.
#[derive(Debug, Args)]
pub struct LogCommand {
    /// Stat ids to record, in order
    #[arg(required = true, value_name = "STAT")]
    pub stats: Vec<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Report command arguments.
#[derive(Debug, Args)]
pub struct ReportCommand {
    /// Event name, position or id
    pub event: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Event name, position or id
    pub event: String,

    /// Output file (defaults to a generated name in the output directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Profile commands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the player profile
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Update player details
    Set {
        /// Player name
        #[arg(long)]
        name: Option<String>,

        /// Jersey number
        #[arg(long)]
        number: Option<String>,

        /// Court position
        #[arg(long)]
        position: Option<String>,
    },

    /// Start tracking a stat
    Track {
        /// Stat id
        id: String,
    },

    /// Stop tracking a stat
    Untrack {
        /// Stat id
        id: String,
    },

    /// Set the short label of a category
    Alias {
        /// Category name or default alias
        #[arg(value_parser = parse_category)]
        category: StatCategory,

        /// New alias (uppercased, at most two characters)
        value: String,
    },

    /// Define a custom stat
    AddStat {
        /// Display label
        label: String,

        /// Category name or default alias
        #[arg(value_parser = parse_category)]
        category: StatCategory,

        /// Explicit stat id (derived from the label if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Remove a custom stat
    RemoveStat {
        /// Stat id
        id: String,
    },
}

/// Backup command arguments.
#[derive(Debug, Args)]
pub struct BackupCommand {
    /// Output file (defaults to a dated name in the output directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Restore command arguments.
#[derive(Debug, Args)]
pub struct RestoreCommand {
    /// Backup file to restore
    pub file: PathBuf,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn parse_category(value: &str) -> Result<StatCategory, String> {
    value.parse().map_err(|e: crate::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("serving"), Ok(StatCategory::Serving));
        assert_eq!(parse_category("BK"), Ok(StatCategory::Blocking));
        assert!(parse_category("spiking").unwrap_err().contains("unknown category"));
    }

    #[test]
    fn test_event_command_debug() {
        let cmd = EventCommand::Delete {
            event: "Spring".to_string(),
            yes: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Delete"));
        assert!(debug_str.contains("yes"));
    }

    #[test]
    fn test_log_command_debug() {
        let cmd = LogCommand {
            stats: vec!["kill".to_string(), "ace".to_string()],
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("kill"));
        assert!(debug_str.contains("ace"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
