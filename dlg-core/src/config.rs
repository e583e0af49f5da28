use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_TABLE_NAME: &str = "diary_entries";
pub const DEFAULT_TIMEZONE: &str = "Asia/Singapore";

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the diary tree, holding `YYYY-MM/YYYY-MM-DD/YYYY-MM-DD.md` files.
    pub diary_dir: PathBuf,
    /// SQLite database the entries are written to.
    pub database_path: PathBuf,
    pub table_name: String,
    /// Recorded next to each row as a label. Times are never converted.
    pub timezone: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    diary_dir: Option<PathBuf>,
    database_path: Option<PathBuf>,
    table_name: Option<String>,
    timezone: Option<String>,
}

impl Config {
    /// Load config from disk (first XDG path, then native) and apply defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Like [`Config::load`], but an explicit `path` replaces the standard locations
    /// and must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_config = match path {
            Some(path) => Self::read_config_at(path)?,
            None => Self::read_file_config()?,
        };
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self {
            diary_dir: file_config
                .diary_dir
                .unwrap_or_else(|| Self::default_data_dir().join("diary")),
            database_path: file_config
                .database_path
                .unwrap_or_else(|| Self::default_data_dir().join("diary.db")),
            table_name: file_config
                .table_name
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            timezone: file_config
                .timezone
                .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        }
    }

    /// Default data root: `{data_dir}/dlg`
    /// - macOS:   `~/Library/Application Support/dlg`
    /// - Linux:   `$XDG_DATA_HOME/dlg` or `~/.local/share/dlg`
    /// - Windows: `%APPDATA%\dlg`
    fn default_data_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.data_dir().join("dlg")
        } else {
            PathBuf::from("./dlg")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("dlg").join("config.toml"));
            v.push(b.config_dir().join("dlg").join("config.toml"));
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if path.exists() {
                return Self::read_config_at(&path);
            }
        }
        Ok(FileConfig::default())
    }

    fn read_config_at(path: &Path) -> Result<FileConfig> {
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
