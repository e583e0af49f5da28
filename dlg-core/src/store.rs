//! SQLite sink for resolved diary entries.
//!
//! One row per [`Entry`]. Dates are stored as `YYYY-MM-DD` and timestamps as
//! `YYYY-MM-DD HH:MM:SS` text, so they sort chronologically and read well in
//! any SQLite client. The `timezone` column only records the configured label.
use crate::entry::Entry;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, Transaction, params};
use std::path::Path;
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TABLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid table name regex"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid table name `{0}`: use letters, digits and underscores only")]
    InvalidTableName(String),
    #[error("table `{0}` already exists")]
    TableExists(String),
}

/// What to do when the table already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WriteMode {
    /// Create the table if needed and add rows to it.
    #[default]
    Append,
    /// Drop the table and start over with only the new rows.
    Replace,
    /// Refuse to write into an existing table.
    Fail,
}

pub struct DiaryStore {
    conn: Connection,
    table: String,
}

impl DiaryStore {
    /// Opens (or creates) the database at `path`. Nothing is written until
    /// [`DiaryStore::write_entries`].
    pub fn open(path: &Path, table: &str) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open(path)?, table)
    }

    pub fn open_in_memory(table: &str) -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, StoreError> {
        if !TABLE_NAME_RE.is_match(table) {
            return Err(StoreError::InvalidTableName(table.to_string()));
        }
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn table_exists(&self) -> Result<bool, StoreError> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![self.table],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Writes `entries` in a single transaction and returns the number of rows inserted.
    pub fn write_entries(
        &mut self,
        entries: &[Entry],
        mode: WriteMode,
        timezone: &str,
    ) -> Result<usize, StoreError> {
        if mode == WriteMode::Fail && self.table_exists()? {
            return Err(StoreError::TableExists(self.table.clone()));
        }

        let table = self.table.clone();
        let tx = self.conn.transaction()?;
        if mode == WriteMode::Replace {
            tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
        }
        create_table(&tx, &table)?;

        let mut written = 0;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table}
                    (date, segment, start_dt, end_dt, duration, category,
                     activity_flag, description, raw_line, timezone)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ))?;
            for entry in entries {
                written += stmt.execute(params![
                    entry.date.format(DATE_FORMAT).to_string(),
                    entry.segment.as_ref(),
                    entry.start_dt.format(DATETIME_FORMAT).to_string(),
                    entry.end_dt.format(DATETIME_FORMAT).to_string(),
                    entry.duration_minutes,
                    entry.category,
                    entry.activity_flag.as_ref().map(AsRef::<str>::as_ref),
                    entry.description,
                    entry.raw_line,
                    timezone,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(table = %self.table, rows = written, %mode, "wrote entries");
        Ok(written)
    }

    /// Number of rows currently in the table, `0` if it does not exist yet.
    pub fn count(&self) -> Result<i64, StoreError> {
        if !self.table_exists()? {
            return Ok(0);
        }
        let n = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })?;
        Ok(n)
    }
}

fn create_table(tx: &Transaction<'_>, table: &str) -> Result<(), StoreError> {
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            segment TEXT NOT NULL CHECK (segment IN ('yesterday', 'plan', 'actual')),
            start_dt TEXT NOT NULL,
            end_dt TEXT NOT NULL,
            duration INTEGER,
            category TEXT NOT NULL,
            activity_flag TEXT,
            description TEXT NOT NULL,
            raw_line TEXT NOT NULL,
            timezone TEXT NOT NULL
        );"
    ))?;
    Ok(())
}
