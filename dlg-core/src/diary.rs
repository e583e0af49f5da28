//! The `Diary` struct: locating day files and loading their entries.
use crate::config::Config;
use crate::dates::get_dates_in_range;
use crate::entry::Entry;
use crate::paths::{day_path, file_date_from_path};
use crate::scanner::{LineError, ScanResult, scan_content};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failure that stops a whole file from being loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file does not exist: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("file name is not a `YYYY-MM-DD` date: {}", .0.display())]
    InvalidFileName(PathBuf),
    #[error("no parsable entries in {}", .0.display())]
    NoEntries(PathBuf),
}

/// Everything loaded from a range of days.
#[derive(Debug, Default)]
pub struct RangeResult {
    pub entries: Vec<Entry>,
    pub line_errors: Vec<(NaiveDate, LineError)>,
    pub errors: Vec<LoadError>,
}

#[derive(Debug)]
pub struct Diary {
    pub config: Config,
}

impl Diary {
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        day_path(&self.config.diary_dir, date)
    }

    /// Reads and scans a single day file. The file's date comes from its name.
    ///
    /// Unlike [`Diary::load_day`] an empty result is not an error here.
    pub fn load_file(&self, path: &Path) -> Result<ScanResult, LoadError> {
        let file_date =
            file_date_from_path(path).ok_or_else(|| LoadError::InvalidFileName(path.to_path_buf()))?;
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::FileNotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(scan_content(&content, file_date))
    }

    /// Loads the entries recorded in the file for `date`.
    ///
    /// Lines that fail to resolve are logged and kept in the result. A missing
    /// file or a file without a single entry is an error.
    pub fn load_day(&self, date: NaiveDate) -> Result<ScanResult, LoadError> {
        let path = self.day_path(date);
        if !path.exists() {
            return Err(LoadError::FileNotFound(path));
        }

        let result = self.load_file(&path)?;
        for error in &result.errors {
            tracing::warn!(path = %path.display(), "{error}");
        }
        if result.entries.is_empty() {
            return Err(LoadError::NoEntries(path));
        }

        tracing::info!(
            path = %path.display(),
            entries = result.entries.len(),
            errors = result.errors.len(),
            skipped = result.skipped,
            "loaded day"
        );
        Ok(result)
    }

    /// Loads every day between `start` and `end`, inclusive.
    ///
    /// A day that fails is recorded in `errors` and the others are still loaded.
    pub fn load_range(&self, start: NaiveDate, end: NaiveDate) -> RangeResult {
        let mut range = RangeResult::default();
        for date in get_dates_in_range(start, end) {
            match self.load_day(date) {
                Ok(result) => {
                    range.entries.extend(result.entries);
                    range
                        .line_errors
                        .extend(result.errors.into_iter().map(|e| (date, e)));
                }
                Err(error) => {
                    tracing::warn!("{error}");
                    range.errors.push(error);
                }
            }
        }
        range
    }
}
