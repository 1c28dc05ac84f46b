//! `acetrack` - CLI for the acetrack volleyball statistics tracker
//!
//! This binary provides the command-line interface for managing events,
//! matches and sets, recording plays, and producing reports.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;
use uuid::Uuid;

use acetrack::backup;
use acetrack::catalog::{self, Catalog, CATEGORY_ORDER};
use acetrack::cli::{
    BackupCommand, Cli, Command, ConfigCommand, EventCommand, ExportCommand, LogCommand,
    MatchCommand, ProfileCommand, ReportCommand, RestoreCommand, SetCommand,
};
use acetrack::export::{self, TimestampStyle};
use acetrack::stats::{format_percentage, CategoryTotals, StatTotals, Summary};
use acetrack::{init_logging, Config, Error, Event, Match, Profile, Selection, Session};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // Bad references and invalid input exit with 2, environment failures with 1
            let user_error = err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_user_error);
            if user_error {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cli.config.as_deref(), cmd),
        // These replace the whole document, so an unreadable one must not block them
        command @ (Command::Restore(_) | Command::Clear(_)) => {
            let mut session = Session::open_recovering(&config).with_context(|| {
                format!("failed to open {}", config.database_path().display())
            })?;
            run(&config, &mut session, command)
        }
        command => {
            let mut session = Session::open(&config).with_context(|| {
                format!("failed to open {}", config.database_path().display())
            })?;
            run(&config, &mut session, command)
        }
    }
}

fn run(config: &Config, session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Event(cmd) => handle_event(session, cmd),
        Command::Match(cmd) => handle_match(config, session, cmd),
        Command::Set(cmd) => handle_set(session, cmd),
        Command::Log(cmd) => handle_log(session, &cmd),
        Command::Undo => handle_undo(session),
        Command::Status(cmd) => handle_status(config, session, cmd.json),
        Command::Report(cmd) => handle_report(session, &cmd),
        Command::Export(cmd) => handle_export(config, session, cmd),
        Command::Stats(cmd) => handle_stats(&session.tracker.profile, cmd.json),
        Command::Profile(cmd) => handle_profile(session, cmd),
        Command::Backup(cmd) => handle_backup(config, session, cmd),
        Command::Restore(cmd) => handle_restore(session, &cmd),
        Command::Clear(cmd) => handle_clear(config, session, cmd.yes),
        Command::Config(cmd) => handle_config(config, None, cmd),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_confirm_hint(action: &str) {
    println!("{action}");
    println!("Use --yes to confirm.");
}

fn plural(count: usize, word: &str) -> String {
    match count {
        1 => format!("{count} {word}"),
        _ if word.ends_with("ch") => format!("{count} {word}es"),
        _ => format!("{count} {word}s"),
    }
}

fn active_marker(active: bool) -> &'static str {
    if active {
        "*"
    } else {
        " "
    }
}

// === Events ===

#[derive(Debug, Serialize)]
struct EventRow<'a> {
    id: Uuid,
    name: &'a str,
    location: &'a str,
    date: NaiveDate,
    end_date: Option<NaiveDate>,
    matches: usize,
    plays: usize,
}

fn handle_event(session: &mut Session, cmd: EventCommand) -> Result<()> {
    match cmd {
        EventCommand::Add {
            name,
            location,
            date,
            end_date,
        } => {
            let event = session
                .tracker
                .add_event(&name, &location, date.unwrap_or_else(today), end_date)?;
            println!("Created event '{}' ({})", event.name, event.date_label());
            session.selection = Selection {
                event_id: Some(event.id),
                ..Selection::default()
            };
            session.commit()?;
        }
        EventCommand::List { json } => {
            let events = &session.tracker.events;
            if json {
                let rows: Vec<EventRow> = events
                    .iter()
                    .map(|e| EventRow {
                        id: e.id,
                        name: &e.name,
                        location: &e.location,
                        date: e.date,
                        end_date: e.end_date,
                        matches: e.matches.len(),
                        plays: e.log_count(),
                    })
                    .collect();
                return print_json(&rows);
            }
            if events.is_empty() {
                println!("No events yet. Create one with `acetrack event add <name>`.");
                return Ok(());
            }
            for (i, event) in events.iter().enumerate() {
                println!(
                    "{}{:>3}. {:<28} {:<22} {:>10} {:>10}",
                    active_marker(session.selection.event_id == Some(event.id)),
                    i + 1,
                    event.name,
                    event.date_label(),
                    plural(event.matches.len(), "match"),
                    plural(event.log_count(), "play"),
                );
            }
        }
        EventCommand::Show { event } => {
            let event = session.tracker.find_event(&event)?;
            print_event(event, &session.selection);
        }
        EventCommand::Delete { event, yes } => {
            let event = session.tracker.find_event(&event)?;
            let (id, name) = (event.id, event.name.clone());
            if !yes {
                print_confirm_hint(&format!(
                    "This will delete event '{name}' with {} and {}.",
                    plural(event.matches.len(), "match"),
                    plural(event.log_count(), "recorded play"),
                ));
                return Ok(());
            }
            session.tracker.delete_event(id)?;
            session.commit()?;
            println!("Deleted event '{name}'");
        }
    }
    Ok(())
}

fn print_event(event: &Event, selection: &Selection) {
    println!("{}", event.name);
    println!("{}", "=".repeat(event.name.chars().count()));
    println!("Dates:     {}", event.date_label());
    if !event.location.is_empty() {
        println!("Location:  {}", event.location);
    }
    println!("Id:        {}", event.id);
    println!();

    if event.matches.is_empty() {
        println!("No matches yet.");
        return;
    }
    println!("Matches:");
    for (i, game) in event.matches.iter().enumerate() {
        let summary = Summary::from_totals(&StatTotals::for_match(game));
        println!(
            "{}{:>3}. vs {:<24} {}  {:>7} {:>10}  hitting {}",
            active_marker(selection.match_id == Some(game.id)),
            i + 1,
            game.opponent,
            game.date,
            plural(game.sets.len(), "set"),
            plural(game.log_count(), "play"),
            format_percentage(summary.attack.hitting_percentage),
        );
    }
}

// === Matches ===

fn handle_match(config: &Config, session: &mut Session, cmd: MatchCommand) -> Result<()> {
    match cmd {
        MatchCommand::Add {
            event,
            opponent,
            date,
        } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let game = session
                .tracker
                .add_match(event_id, &opponent, date.unwrap_or_else(today))?;
            println!("Added match vs {} on {}", game.opponent, game.date);
            session.selection = Selection {
                event_id: Some(event_id),
                match_id: Some(game.id),
                set_id: None,
            };
            session.commit()?;
        }
        MatchCommand::List { event } => {
            let event = session.tracker.find_event(&event)?;
            print_event(event, &session.selection);
        }
        MatchCommand::Show { event, game } => {
            let event = session.tracker.find_event(&event)?;
            let game = session.tracker.find_match(event.id, &game)?;
            print_match(game, &session.tracker.profile.catalog(), &session.selection);
        }
        MatchCommand::Delete { event, game, yes } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let game = session.tracker.find_match(event_id, &game)?;
            let (match_id, opponent) = (game.id, game.opponent.clone());
            if !yes {
                print_confirm_hint(&format!(
                    "This will delete the match vs {opponent} with {} and {}.",
                    plural(game.sets.len(), "set"),
                    plural(game.log_count(), "recorded play"),
                ));
                return Ok(());
            }
            session.tracker.delete_match(event_id, match_id)?;
            session.commit()?;
            println!("Deleted match vs {opponent}");
        }
        MatchCommand::Export {
            event,
            game,
            output,
        } => {
            let event = session.tracker.find_event(&event)?;
            let game = session.tracker.find_match(event.id, &game)?;
            let report = export::match_report(
                game,
                &session.tracker.profile.catalog(),
                &TimestampStyle::from(&config.export),
            );
            let path = config.output_path(output, &export::match_file_name(game, today()));
            let written = export::write_report(&path, &report)?;
            println!(
                "Exported {} to {}",
                plural(game.log_count(), "play"),
                written.display()
            );
        }
    }
    Ok(())
}

fn print_match(game: &Match, catalog: &Catalog, selection: &Selection) {
    println!("vs {} ({})", game.opponent, game.date);
    println!("Id: {}", game.id);
    println!();
    if game.sets.is_empty() {
        println!("No sets yet.");
        return;
    }

    for set in &game.sets {
        let totals = StatTotals::for_set(set);
        println!(
            "{}Set {}{}  ({})",
            active_marker(selection.set_id == Some(set.id)),
            set.set_number,
            if set.is_completed { " [complete]" } else { "" },
            plural(set.logs.len(), "play"),
        );
        print_category_totals(&totals.by_category(catalog), "    ");
    }

    println!();
    print_summary(&Summary::from_totals(&StatTotals::for_match(game)));
}

fn print_category_totals(categories: &[CategoryTotals], indent: &str) {
    for group in categories {
        let entries: Vec<String> = group
            .entries
            .iter()
            .map(|e| format!("{} {}", e.stat.label, e.total))
            .collect();
        println!("{indent}{:<10} {}", group.category, entries.join(", "));
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "Kills {}  Aces {}  Blocks {}  Digs {}",
        summary.kills, summary.aces, summary.blocks, summary.digs
    );
    println!(
        "Hitting {} ({} attacks)  Serve {} ({} serves)",
        format_percentage(summary.attack.hitting_percentage),
        summary.attack.total_attacks,
        format_percentage(summary.serve.serve_percentage),
        summary.serve.total_serves,
    );
}

// === Sets ===

fn handle_set(session: &mut Session, cmd: SetCommand) -> Result<()> {
    match cmd {
        SetCommand::Add { event, game } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let match_id = session.tracker.find_match(event_id, &game)?.id;
            let path = session.tracker.add_set(event_id, match_id)?;
            let number = session.tracker.game_set(&path)?.set_number;
            session.selection = Selection::for_set(path);
            session.commit()?;
            println!("Started set {number} (now active)");
        }
        SetCommand::List { event, game } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let game = session.tracker.find_match(event_id, &game)?;
            if game.sets.is_empty() {
                println!("No sets yet.");
            }
            for set in &game.sets {
                let summary = Summary::from_totals(&StatTotals::for_set(set));
                println!(
                    "{}Set {:<3} {:<9} {:>9}  hitting {}",
                    active_marker(session.selection.set_id == Some(set.id)),
                    set.set_number,
                    if set.is_completed { "complete" } else { "open" },
                    plural(set.logs.len(), "play"),
                    format_percentage(summary.attack.hitting_percentage),
                );
            }
        }
        SetCommand::Select {
            event,
            game,
            number,
        } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let game = session.tracker.find_match(event_id, &game)?;
            let opponent = game.opponent.clone();
            let path = session.tracker.find_set(event_id, game.id, number)?;
            session.selection = Selection::for_set(path);
            session.commit()?;
            println!("Set {number} vs {opponent} is now active");
        }
        SetCommand::Complete => {
            let path = session.active_set()?;
            let completed = session.tracker.toggle_set_complete(&path)?;
            let number = session.tracker.game_set(&path)?.set_number;
            session.commit()?;
            if completed {
                println!("Set {number} marked complete");
            } else {
                println!("Set {number} reopened");
            }
        }
        SetCommand::Delete {
            event,
            game,
            number,
            yes,
        } => {
            let event_id = session.tracker.find_event(&event)?.id;
            let match_id = session.tracker.find_match(event_id, &game)?.id;
            let path = session.tracker.find_set(event_id, match_id, number)?;
            if !yes {
                let plays = session.tracker.game_set(&path)?.logs.len();
                print_confirm_hint(&format!(
                    "This will delete set {number} and its {}.",
                    plural(plays, "recorded play"),
                ));
                return Ok(());
            }
            session.tracker.delete_set(&path)?;
            session.commit()?;
            println!("Deleted set {number}");
        }
    }
    Ok(())
}

// === Recording ===

fn handle_log(session: &mut Session, cmd: &LogCommand) -> Result<()> {
    let path = session.active_set()?;
    let catalog = session.tracker.profile.catalog();

    let mut labels = Vec::with_capacity(cmd.stats.len());
    for stat in &cmd.stats {
        let stat = stat.trim();
        session.tracker.record_stat(&path, stat, Utc::now())?;
        labels.push(catalog.label_for(stat).to_string());
    }

    let set = session.tracker.game_set(&path)?;
    let (number, count) = (set.set_number, set.logs.len());
    session.commit()?;
    println!(
        "Recorded {} in set {number} ({} total)",
        labels.join(", "),
        plural(count, "play")
    );
    Ok(())
}

fn handle_undo(session: &mut Session) -> Result<()> {
    let path = session.active_set()?;
    match session.tracker.undo_last(&path)? {
        Some(log) => {
            let label = session
                .tracker
                .profile
                .catalog()
                .label_for(&log.stat_id)
                .to_string();
            session.commit()?;
            println!(
                "Removed {label} recorded at {}",
                log.timestamp.with_timezone(&Local).format("%H:%M:%S")
            );
        }
        None => {
            let number = session.tracker.game_set(&path)?.set_number;
            println!("Nothing to undo in set {number}");
        }
    }
    Ok(())
}

// === Status and reports ===

#[derive(Debug, Serialize)]
struct ActiveSet {
    number: u32,
    completed: bool,
    plays: usize,
    totals: StatTotals,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    database_path: String,
    event: Option<String>,
    opponent: Option<String>,
    set: Option<ActiveSet>,
    storage: acetrack::StorageStats,
}

fn handle_status(config: &Config, session: &Session, json: bool) -> Result<()> {
    let tracker = &session.tracker;
    let event = session
        .selection
        .event_id
        .and_then(|id| tracker.event(id).ok());
    let game = event.and_then(|e| {
        session
            .selection
            .match_id
            .and_then(|id| tracker.get_match(e.id, id).ok())
    });
    let set = session
        .selection
        .set_path()
        .and_then(|path| tracker.game_set(&path).ok())
        .map(|set| {
            let totals = StatTotals::for_set(set);
            ActiveSet {
                number: set.set_number,
                completed: set.is_completed,
                plays: set.logs.len(),
                summary: Summary::from_totals(&totals),
                totals,
            }
        });

    let status = StatusReport {
        database_path: config.database_path().display().to_string(),
        event: event.map(|e| e.name.clone()),
        opponent: game.map(|g| g.opponent.clone()),
        set,
        storage: session.storage().stats()?,
    };

    if json {
        return print_json(&status);
    }

    let profile = &tracker.profile;
    println!("acetrack status");
    println!("---------------");
    println!(
        "Player:    {} #{} ({})",
        profile.name, profile.number, profile.position
    );
    println!("Event:     {}", status.event.as_deref().unwrap_or("-"));
    println!(
        "Match:     {}",
        status
            .opponent
            .as_ref()
            .map_or_else(|| "-".to_string(), |o| format!("vs {o}"))
    );
    match &status.set {
        Some(active) => {
            println!(
                "Set:       {}{} ({})",
                active.number,
                if active.completed { " [complete]" } else { "" },
                plural(active.plays, "play"),
            );
            let catalog = profile.catalog();
            for group in active.totals.by_category(&catalog) {
                let entries: Vec<String> = group
                    .entries
                    .iter()
                    .map(|e| format!("{} {}", e.stat.label, e.total))
                    .collect();
                println!(
                    "  [{}] {}",
                    profile.alias(group.category),
                    entries.join(", ")
                );
            }
            println!(
                "  Hitting {}  Serve {}",
                format_percentage(active.summary.attack.hitting_percentage),
                format_percentage(active.summary.serve.serve_percentage),
            );
        }
        None => println!("Set:       - (select one with `acetrack set select`)"),
    }

    let storage = &status.storage;
    println!();
    println!("Database:  {}", status.database_path);
    println!(
        "Stored:    {}, {}, {}, {}",
        plural(storage.counts.events, "event"),
        plural(storage.counts.matches, "match"),
        plural(storage.counts.sets, "set"),
        plural(storage.counts.logs, "play"),
    );
    println!(
        "Size:      {} bytes (document {} bytes)",
        storage.db_size_bytes, storage.document_bytes
    );
    if let Some(saved_at) = storage.saved_at {
        println!(
            "Saved:     {}",
            saved_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct MatchLine<'a> {
    opponent: &'a str,
    date: NaiveDate,
    sets: usize,
    plays: usize,
    hitting_percentage: f64,
}

#[derive(Debug, Serialize)]
struct EventReport<'a> {
    event: &'a str,
    dates: String,
    plays: usize,
    summary: Summary,
    categories: Vec<CategoryTotals>,
    matches: Vec<MatchLine<'a>>,
}

fn handle_report(session: &Session, cmd: &ReportCommand) -> Result<()> {
    let event = session.tracker.find_event(&cmd.event)?;
    let catalog = session.tracker.profile.catalog();
    let totals = StatTotals::for_event(event);

    let report = EventReport {
        event: &event.name,
        dates: event.date_label(),
        plays: event.log_count(),
        summary: Summary::from_totals(&totals),
        categories: totals.by_category(&catalog),
        matches: event
            .matches
            .iter()
            .map(|game| MatchLine {
                opponent: &game.opponent,
                date: game.date,
                sets: game.sets.len(),
                plays: game.log_count(),
                hitting_percentage: Summary::from_totals(&StatTotals::for_match(game))
                    .attack
                    .hitting_percentage,
            })
            .collect(),
    };

    if cmd.json {
        return print_json(&report);
    }

    println!("{} ({})", report.event, report.dates);
    println!("{}", "=".repeat(report.event.chars().count()));
    if report.plays == 0 {
        println!("No stats recorded yet.");
        return Ok(());
    }
    print_summary(&report.summary);
    println!();
    print_category_totals(&report.categories, "  ");
    println!();
    println!("By match:");
    for line in &report.matches {
        println!(
            "  vs {:<24} {}  {:>7} {:>10}  hitting {}",
            line.opponent,
            line.date,
            plural(line.sets, "set"),
            plural(line.plays, "play"),
            format_percentage(line.hitting_percentage),
        );
    }
    Ok(())
}

fn handle_export(config: &Config, session: &Session, cmd: ExportCommand) -> Result<()> {
    let event = session.tracker.find_event(&cmd.event)?;
    let report = export::tournament_report(
        event,
        &session.tracker.profile.catalog(),
        &TimestampStyle::from(&config.export),
    )?;
    let path = config.output_path(cmd.output, &export::tournament_file_name(event));
    let written = export::write_report(&path, &report)?;
    println!(
        "Exported {} to {}",
        plural(event.log_count(), "play"),
        written.display()
    );
    Ok(())
}

fn handle_stats(profile: &Profile, json: bool) -> Result<()> {
    let catalog = profile.catalog();
    if json {
        let stats: Vec<_> = catalog
            .iter()
            .map(|stat| {
                serde_json::json!({
                    "id": stat.id,
                    "label": stat.label,
                    "category": stat.category,
                    "tracked": profile.is_tracked(&stat.id),
                    "custom": !catalog::is_builtin(&stat.id),
                })
            })
            .collect();
        return print_json(&stats);
    }

    for category in CATEGORY_ORDER {
        println!("{} [{}]", category, profile.alias(category));
        for stat in catalog.by_category(category) {
            println!(
                "  [{}] {:<16} {}{}",
                if profile.is_tracked(&stat.id) { "x" } else { " " },
                stat.id,
                stat.label,
                if catalog::is_builtin(&stat.id) { "" } else { " (custom)" },
            );
        }
    }
    Ok(())
}

// === Profile ===

fn handle_profile(session: &mut Session, cmd: ProfileCommand) -> Result<()> {
    let profile = &mut session.tracker.profile;
    match cmd {
        ProfileCommand::Show { json } => {
            if json {
                return print_json(&*profile);
            }
            println!("Name:      {}", profile.name);
            println!("Number:    {}", profile.number);
            println!("Position:  {}", profile.position);
            println!(
                "Tracking:  {} of {} stats",
                profile.tracked().len(),
                profile.catalog().len()
            );
            let aliases: Vec<String> = CATEGORY_ORDER
                .into_iter()
                .map(|c| format!("{c}={}", profile.alias(c)))
                .collect();
            println!("Aliases:   {}", aliases.join(", "));
            if !profile.custom_stats.is_empty() {
                println!("Custom:");
                for stat in &profile.custom_stats {
                    println!("  {:<16} {} ({})", stat.id, stat.label, stat.category);
                }
            }
            return Ok(());
        }
        ProfileCommand::Set {
            name,
            number,
            position,
        } => {
            if let Some(name) = name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(Error::invalid_input("name cannot be empty").into());
                }
                profile.name = name.to_string();
            }
            if let Some(number) = number {
                profile.number = number.trim().to_string();
            }
            if let Some(position) = position {
                profile.position = position.trim().to_string();
            }
            println!(
                "Profile: {} #{} ({})",
                profile.name, profile.number, profile.position
            );
        }
        ProfileCommand::Track { id } => {
            if profile.set_tracked(&id, true)? {
                println!("Now tracking {id}");
            } else {
                println!("Already tracking {id}");
            }
        }
        ProfileCommand::Untrack { id } => {
            if profile.set_tracked(&id, false)? {
                println!("Stopped tracking {id}");
            } else {
                println!("{id} was not tracked");
            }
        }
        ProfileCommand::Alias { category, value } => {
            let alias = profile.set_alias(category, &value)?;
            println!("{category} alias set to {alias}");
        }
        ProfileCommand::AddStat {
            label,
            category,
            id,
        } => {
            let stat = profile.add_custom_stat(&label, category, id.as_deref())?;
            println!("Added {} ({}) to {}", stat.label, stat.id, stat.category);
        }
        ProfileCommand::RemoveStat { id } => {
            let stat = profile.remove_custom_stat(&id)?;
            println!("Removed {} ({})", stat.label, stat.id);
        }
    }
    session.commit()?;
    Ok(())
}

// === Backup ===

fn handle_backup(config: &Config, session: &Session, cmd: BackupCommand) -> Result<()> {
    if !session.is_stored() {
        return Err(Error::NoData.into());
    }
    let path = config.output_path(cmd.output, &backup::backup_file_name(today()));
    backup::write_backup(&path, &session.tracker)?;
    println!(
        "Backed up {} to {}",
        plural(session.tracker.events.len(), "event"),
        path.display()
    );
    Ok(())
}

fn handle_restore(session: &mut Session, cmd: &RestoreCommand) -> Result<()> {
    let restored = backup::read_backup(&cmd.file)?;
    if !cmd.yes {
        print_confirm_hint(&format!(
            "Restoring {} ({}, {}) will overwrite all current data.",
            cmd.file.display(),
            plural(restored.events.len(), "event"),
            plural(restored.log_count(), "recorded play"),
        ));
        return Ok(());
    }
    let events = restored.events.len();
    session.replace(restored);
    session.commit()?;
    println!("Restored {} from {}", plural(events, "event"), cmd.file.display());
    Ok(())
}

fn handle_clear(config: &Config, session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        print_confirm_hint(&format!(
            "This will permanently delete {} and the player profile.",
            plural(session.tracker.events.len(), "event"),
        ));
        return Ok(());
    }
    if session.reset(&config.profile)? {
        println!("All data deleted");
    } else {
        println!("Nothing to delete");
    }
    Ok(())
}

// === Configuration ===

fn handle_config(config: &Config, custom_path: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                return print_json(config);
            }
            println!("Current Configuration");
            println!("=====================");
            println!();
            println!("[Storage]");
            println!("  Database path:      {}", config.database_path().display());
            println!();
            println!("[Export]");
            println!("  Output directory:   {}", config.export.output_dir.display());
            println!("  Timestamp format:   {}", config.export.timestamp_format);
            println!("  Local time:         {}", config.export.local_time);
            println!();
            println!("[Profile]");
            println!("  Name:               {}", config.profile.name);
            println!("  Number:             {}", config.profile.number);
            println!("  Position:           {}", config.profile.position);
        }
        ConfigCommand::Path => {
            let path = custom_path.map_or_else(Config::default_config_path, Path::to_path_buf);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or_else(|| custom_path.map(Path::to_path_buf))
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
