//! Command-line interface for acetrack.
//!
//! This module provides the CLI structure for the `acetrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BackupCommand, ClearCommand, ConfigCommand, EventCommand, ExportCommand, LogCommand,
    MatchCommand, ProfileCommand, ReportCommand, RestoreCommand, SetCommand, StatsCommand,
    StatusCommand,
};

use crate::logging::Verbosity;

/// acetrack - Track your volleyball stats, play by play
///
/// Record kills, aces, digs and more for each set of each match, then review
/// totals and hitting percentage or export CSV reports.
#[derive(Debug, Parser)]
#[command(name = "acetrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage events (tournaments)
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage matches within an event
    #[command(subcommand)]
    Match(MatchCommand),

    /// Manage sets within a match
    #[command(subcommand)]
    Set(SetCommand),

    /// Record plays into the active set
    Log(LogCommand),

    /// Remove the last play recorded in the active set
    Undo,

    /// Show the active set and storage status
    Status(StatusCommand),

    /// Show tournament totals and efficiencies
    Report(ReportCommand),

    /// Write the full tournament report as CSV
    Export(ExportCommand),

    /// List all available stats
    Stats(StatsCommand),

    /// View or edit the player profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Back up all data to a JSON file
    Backup(BackupCommand),

    /// Replace all data with a JSON backup
    Restore(RestoreCommand),

    /// Delete all data
    Clear(ClearCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    use crate::catalog::StatCategory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "acetrack");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["acetrack", "undo"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["acetrack", "-v", "undo"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["acetrack", "-vv", "undo"]).verbosity(), Verbosity::Debug);
        assert_eq!(parse(&["acetrack", "-q", "undo"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["acetrack", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Status(StatusCommand { json: false })));
    }

    #[test]
    fn test_parse_event_add() {
        let cli = parse(&[
            "acetrack",
            "event",
            "add",
            "Spring Classic",
            "--location",
            "Main Gym",
            "--date",
            "2025-03-08",
            "--end-date",
            "2025-03-09",
        ]);
        let Command::Event(EventCommand::Add {
            name,
            location,
            date,
            end_date,
        }) = cli.command
        else {
            panic!("expected event add");
        };
        assert_eq!(name, "Spring Classic");
        assert_eq!(location, "Main Gym");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 8));
        assert_eq!(end_date, NaiveDate::from_ymd_opt(2025, 3, 9));
    }

    #[test]
    fn test_parse_bad_date() {
        let result = Cli::try_parse_from(["acetrack", "event", "add", "Cup", "--date", "03/08/2025"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_log_requires_stat() {
        assert!(Cli::try_parse_from(["acetrack", "log"]).is_err());

        let cli = parse(&["acetrack", "log", "kill", "ace"]);
        let Command::Log(cmd) = cli.command else {
            panic!("expected log");
        };
        assert_eq!(cmd.stats, vec!["kill", "ace"]);
    }

    #[test]
    fn test_parse_set_select() {
        let cli = parse(&["acetrack", "set", "select", "1", "Eagles", "2"]);
        assert!(matches!(
            cli.command,
            Command::Set(SetCommand::Select { number: 2, .. })
        ));
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = parse(&["acetrack", "match", "delete", "Cup", "Eagles", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Match(MatchCommand::Delete { yes: true, .. })
        ));
    }

    #[test]
    fn test_parse_profile_add_stat() {
        let cli = parse(&[
            "acetrack",
            "profile",
            "add-stat",
            "Overpass",
            "DF",
            "--id",
            "overpass",
        ]);
        let Command::Profile(ProfileCommand::AddStat {
            label,
            category,
            id,
        }) = cli.command
        else {
            panic!("expected profile add-stat");
        };
        assert_eq!(label, "Overpass");
        assert_eq!(category, StatCategory::Defense);
        assert_eq!(id.as_deref(), Some("overpass"));
    }

    #[test]
    fn test_parse_profile_alias_unknown_category() {
        let result = Cli::try_parse_from(["acetrack", "profile", "alias", "spiking", "SP"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_restore() {
        let cli = parse(&["acetrack", "restore", "backup.json"]);
        let Command::Restore(cmd) = cli.command else {
            panic!("expected restore");
        };
        assert_eq!(cmd.file, PathBuf::from("backup.json"));
        assert!(!cmd.yes);
    }
}
