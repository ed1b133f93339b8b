//! Playoff CLI - binary entry point and terminal session flow.
//!
//! A session walks through four phases:
//!
//! ```text
//! main() -> select entrants (catalog picks or quick-start slate)
//!        -> seeded bracket, one matchup at a time
//!        -> report (profile + optional organizational alignment)
//!        -> optional JSON export
//! ```
//!
//! All tournament logic lives in [`playoff_core`]; this crate only does IO.

use std::{
    env,
    fs::{self, OpenOptions},
    io::{BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
    time::Instant,
};

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use playoff_config::SessionConfig;
use playoff_core::{Bracket, ENTRANT_COUNT, Report};
use playoff_types::{Category, Principle, PrincipleId, predefined};

fn main() -> ExitCode {
    let args = match CliArgs::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("playoff {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("session failed: {err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => Some(
            SessionConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
        ),
        None => SessionConfig::load().context("loading config")?,
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let quick = args.quick || config.as_ref().is_some_and(|c| c.session.quick_start);
    let entrants = if quick {
        writeln!(output, "Quick start: using a balanced slate of 16 principles.")?;
        quick_slate()
    } else {
        select_entrants(&mut input, &mut output)?
    };

    let mut bracket = Bracket::seeded(entrants, &mut rand::rng())?;
    tracing::info!("bracket seeded");
    let started = Instant::now();

    while let Some(open) = bracket.open_matchup() {
        let (round_index, matchup_index) = (open.round_index(), open.matchup_index());
        let matchup = open.matchup();
        let (a, b) = match (matchup.slot_a(), matchup.slot_b()) {
            (Some(a), Some(b)) => (a.clone(), b.clone()),
            _ => bail!("open matchup {} is missing a participant", matchup.id()),
        };

        writeln!(output)?;
        writeln!(
            output,
            "{} - matchup {} of {}",
            open.stage().label(),
            matchup_index + 1,
            open.stage().matchup_count()
        )?;
        writeln!(output, "  [1] {} - {}", a.title(), a.description())?;
        writeln!(output, "  [2] {} - {}", b.title(), b.description())?;

        let winner = loop {
            write!(output, "Which matters more to you? [1/2] ")?;
            output.flush()?;
            let line = read_line(&mut input)?;
            match line.trim() {
                "1" => break a.id().clone(),
                "2" => break b.id().clone(),
                other => writeln!(output, "Unrecognized choice {other:?}; enter 1 or 2.")?,
            }
        };

        bracket.record_winner(round_index, matchup_index, &winner)?;
        let progress = bracket.progress();
        writeln!(
            output,
            "Recorded. {} of {} matchups decided.",
            progress.decided(),
            progress.total()
        )?;
    }

    let elapsed = started.elapsed();
    let organization = config.as_ref().and_then(|c| c.organization.as_ref());
    let reference: Vec<String> = organization
        .map(|org| org.principles().to_vec())
        .unwrap_or_default();
    let context = organization.and_then(|org| org.context());

    let report = Report::new(&bracket, &reference, context, Some(elapsed))?;
    writeln!(output)?;
    writeln!(output, "{}", report.render())?;

    if let Some(path) = &args.export {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        writeln!(output, "Exported results to {}", path.display())?;
        tracing::info!(path = %path.display(), "results exported");
    }

    Ok(())
}

// ── Arguments ────────────────────────────────────────────────

const USAGE: &str = "\
Usage: playoff [OPTIONS]

Options:
  --config <PATH>  Read session config from PATH instead of ~/.playoff/config.toml
  --export <PATH>  Write the finished report as JSON to PATH
  --quick          Skip selection and seed a balanced 16-principle slate
  --version        Print version
  --help           Print this help";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    export: Option<PathBuf>,
    quick: bool,
    help: bool,
    version: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config requires a path")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--export" => {
                    let value = args.next().context("--export requires a path")?;
                    parsed.export = Some(PathBuf::from(value));
                }
                "--quick" => parsed.quick = true,
                "--help" | "-h" => parsed.help = true,
                "--version" | "-V" => parsed.version = true,
                other => bail!("unrecognized argument: {other}"),
            }
        }
        Ok(parsed)
    }
}

// ── Logging ──────────────────────────────────────────────────

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // If no log file can be opened, keep the terminal clean rather than
    // interleaving log lines with prompts.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.playoff/logs/playoff.log
    if let Some(config_path) = playoff_config::config_path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("playoff.log"));
    }

    // Fallback: ./.playoff/logs/playoff.log
    candidates.push(PathBuf::from(".playoff").join("logs").join("playoff.log"));

    candidates
}

// ── Entrant selection ────────────────────────────────────────

/// A balanced slate: cycle through the categories taking one predefined
/// principle from each until sixteen are collected.
fn quick_slate() -> Vec<Principle> {
    let mut entrants = Vec::with_capacity(ENTRANT_COUNT);
    let mut depth = 0;
    while entrants.len() < ENTRANT_COUNT {
        for category in Category::ALL {
            if entrants.len() == ENTRANT_COUNT {
                break;
            }
            if let Some(principle) =
                playoff_types::predefined_in(category).nth(depth)
            {
                entrants.push(principle.clone());
            }
        }
        depth += 1;
    }
    entrants
}

/// Interactive selection: show the catalog, collect sixteen distinct picks.
///
/// Each input line holds catalog numbers separated by spaces or commas, or a
/// custom principle of the form `custom <category>: <title> | <description>`.
fn select_entrants(input: &mut impl BufRead, output: &mut impl Write) -> Result<Vec<Principle>> {
    let catalog = predefined();

    writeln!(output, "Select {ENTRANT_COUNT} principles for your tournament.")?;
    let mut current_category = None;
    for (index, principle) in catalog.iter().enumerate() {
        if current_category != Some(principle.category()) {
            current_category = Some(principle.category());
            writeln!(output)?;
            writeln!(output, "{}", principle.category())?;
        }
        writeln!(
            output,
            "  {:>2}. {} - {}",
            index + 1,
            principle.title(),
            principle.description()
        )?;
    }
    writeln!(output)?;
    writeln!(
        output,
        "Enter numbers separated by spaces, or `custom <category>: <title> | <description>`."
    )?;

    let mut entrants: Vec<Principle> = Vec::new();
    let mut custom_count = 0;
    while entrants.len() < ENTRANT_COUNT {
        write!(output, "[{} of {ENTRANT_COUNT}] > ", entrants.len())?;
        output.flush()?;
        let line = read_line(input)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("custom ") {
            custom_count += 1;
            match parse_custom(rest, custom_count) {
                Ok(principle) => entrants.push(principle),
                Err(err) => {
                    custom_count -= 1;
                    writeln!(output, "{err}")?;
                }
            }
            continue;
        }

        for token in line.split([' ', ',']).filter(|t| !t.is_empty()) {
            if entrants.len() == ENTRANT_COUNT {
                break;
            }
            let Ok(number) = token.parse::<usize>() else {
                writeln!(output, "Not a catalog number: {token}")?;
                continue;
            };
            let Some(principle) = number.checked_sub(1).and_then(|i| catalog.get(i)) else {
                writeln!(output, "No catalog entry {number}")?;
                continue;
            };
            if entrants.iter().any(|p| p.id() == principle.id()) {
                writeln!(output, "{} is already selected", principle.title())?;
                continue;
            }
            entrants.push(principle.clone());
        }
    }

    Ok(entrants)
}

/// Parse `<category>: <title> | <description>` into a custom principle.
fn parse_custom(entry: &str, ordinal: usize) -> Result<Principle> {
    let (category_raw, rest) = entry
        .split_once(':')
        .context("expected `custom <category>: <title> | <description>`")?;
    let category = Category::parse(category_raw.trim())
        .with_context(|| format!("unknown category {:?}", category_raw.trim()))?;
    let (title, description) = rest.split_once('|').unwrap_or((rest, ""));

    let id = PrincipleId::new(format!("custom-{ordinal}"))?;
    let principle = Principle::custom(id, category, title.trim(), description.trim())?;
    Ok(principle)
}

fn read_line(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        bail!("input closed before the session finished");
    }
    Ok(line)
}

// ── Tests ────────────────────────────────────────────────────
