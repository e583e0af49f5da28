use crate::grammar::Flag;
use crate::section::Section;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A resolved diary line, ready to be stored as one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The day the entry belongs to, which is not always the file's date.
    pub date: NaiveDate,
    pub segment: Section,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    /// `None` for point events.
    pub duration_minutes: Option<i64>,
    /// Comma-joined tags, e.g. `work,study`.
    pub category: String,
    pub activity_flag: Option<Flag>,
    pub description: String,
    pub raw_line: String,
}

impl Entry {
    pub fn is_point_event(&self) -> bool {
        self.start_dt == self.end_dt
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category.split(',')
    }
}
