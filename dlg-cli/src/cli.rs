use crate::render::ColorMode;
use clap::{Parser, ValueEnum};
use dlg_core::WriteMode;
use std::path::PathBuf;

/// dlg — load checklist diary files into a SQLite table
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Prints the diary root directory
    #[arg(long, short, exclusive = true)]
    pub path: bool,
    /// Day to load: `YYYY-MM-DD`, `today` or `yesterday`. Defaults to today.
    #[arg(long, short, conflicts_with_all = ["from", "to"])]
    pub date: Option<String>,
    /// Load every day from this date on (inclusive).
    #[arg(long)]
    pub from: Option<String>,
    /// Last day of a `--from` range (inclusive). Defaults to today.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Parse and print the entries without writing them.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    /// Print the entries as JSON instead of writing them.
    #[arg(long)]
    pub json: bool,
    /// What to do when the table already exists.
    #[arg(long, value_enum, default_value_t = Mode::Append)]
    pub mode: Mode,
    /// Read configuration from this TOML file instead of the standard locations.
    #[arg(long, env = "DLG_CONFIG")]
    pub config: Option<PathBuf>,
    /// Overrides `diary_dir` from the config file.
    #[arg(long)]
    pub diary_dir: Option<PathBuf>,
    /// Overrides `database_path` from the config file.
    #[arg(long)]
    pub database: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Show debug logs.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Append,
    Replace,
    Fail,
}

impl From<Mode> for WriteMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Append => WriteMode::Append,
            Mode::Replace => WriteMode::Replace,
            Mode::Fail => WriteMode::Fail,
        }
    }
}
