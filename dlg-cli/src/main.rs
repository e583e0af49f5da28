mod cli;
mod render;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::Cli;
use dlg_core::{Config, Diary, DiaryStore, Entry, LineError, LoadError, dates::parse_date_arg};
use render::{Renderer, use_color};
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dlg: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// What was read from the diary for the requested day(s).
struct Loaded {
    label: String,
    entries: Vec<Entry>,
    line_errors: Vec<(String, LineError)>,
    errors: Vec<LoadError>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = &cli.diary_dir {
        config.diary_dir = dir.clone();
    }
    if let Some(db) = &cli.database {
        config.database_path = db.clone();
    }
    tracing::debug!(?config, "loaded configuration");

    let diary = Diary::with_config(config);
    let renderer = Renderer::new(use_color(cli.color));

    if cli.path {
        renderer.print_info(&format!("{}", diary.config.diary_dir.display()));
        return Ok(());
    }

    let today = Local::now().date_naive();
    let loaded = load(&cli, &diary, today)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&loaded.entries)?);
        return report_load_errors(&renderer, &loaded);
    }

    if cli.dry_run {
        renderer.print_info(&format!(
            "{} entries found for {}.",
            loaded.entries.len(),
            loaded.label
        ));
        renderer.print_entries(&loaded.entries);
        return report_load_errors(&renderer, &loaded);
    }

    let summary = write(&diary.config, &loaded.entries, cli.mode.into())?;
    renderer.print_info(&format!(
        "{} rows from {} inserted into {}.",
        summary.rows, loaded.label, summary.table
    ));
    report_load_errors(&renderer, &loaded)
}

fn load(cli: &Cli, diary: &Diary, today: NaiveDate) -> Result<Loaded> {
    if let Some(from) = &cli.from {
        let start = date_arg(from, today)?;
        let end = match &cli.to {
            Some(to) => date_arg(to, today)?,
            None => today,
        };
        if start > end {
            bail!("--from {start} is after --to {end}");
        }

        let range = diary.load_range(start, end);
        if range.entries.is_empty() {
            let reasons: Vec<String> = range.errors.iter().map(ToString::to_string).collect();
            bail!(
                "no entries between {start} and {end}:\n  {}",
                reasons.join("\n  ")
            );
        }
        return Ok(Loaded {
            label: format!("{start}..{end}"),
            entries: range.entries,
            line_errors: range
                .line_errors
                .into_iter()
                .map(|(date, e)| (date.to_string(), e))
                .collect(),
            errors: range.errors,
        });
    }

    let date = match &cli.date {
        Some(input) => date_arg(input, today)?,
        None => today,
    };
    let result = diary.load_day(date)?;
    Ok(Loaded {
        label: date.to_string(),
        entries: result.entries,
        line_errors: result
            .errors
            .into_iter()
            .map(|e| (date.to_string(), e))
            .collect(),
        errors: Vec::new(),
    })
}

fn date_arg(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_date_arg(input, today)
        .ok_or_else(|| anyhow!("invalid date `{input}`: expected YYYY-MM-DD, today or yesterday"))
}

/// Rows written and the table they went to.
#[derive(Debug, PartialEq, Eq)]
struct WriteSummary {
    rows: usize,
    table: String,
}

fn write(config: &Config, entries: &[Entry], mode: dlg_core::WriteMode) -> Result<WriteSummary> {
    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut store = DiaryStore::open(&config.database_path, &config.table_name)
        .with_context(|| format!("opening {}", config.database_path.display()))?;
    let rows = store
        .write_entries(entries, mode, &config.timezone)
        .with_context(|| format!("writing to table {}", store.table_name()))?;
    Ok(WriteSummary {
        rows,
        table: store.table_name().to_string(),
    })
}

/// Shows skipped lines and failed days. Failed days make the run fail after
/// everything else has been processed.
fn report_load_errors(renderer: &Renderer, loaded: &Loaded) -> Result<()> {
    renderer.print_line_errors(
        loaded
            .line_errors
            .iter()
            .map(|(label, error)| (label.clone(), error)),
    );
    renderer.print_errors(&loaded.errors);
    if !loaded.errors.is_empty() {
        bail!("{} day(s) could not be loaded", loaded.errors.len());
    }
    Ok(())
}
