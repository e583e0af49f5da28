//! Walks the lines of a day file in order, tracking the current section and
//! handing entry lines to the grammar and resolver.
use crate::entry::Entry;
use crate::grammar::match_line;
use crate::resolver::{ResolveError, resolve};
use crate::section::{ScanState, header_label};
use chrono::NaiveDate;
use thiserror::Error;

/// A line that looked like an entry but could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number} `{line}`: {error}")]
pub struct LineError {
    /// 1-based.
    pub line_number: usize,
    pub line: String,
    #[source]
    pub error: ResolveError,
}

#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<Entry>,
    pub errors: Vec<LineError>,
    /// Non-blank lines inside a section that are not entries.
    pub skipped: usize,
}

/// Scans the whole content of a day file dated `file_date`.
///
/// Nothing is read before the first known section header, and a header with
/// an unknown label stops collection until the next known one.
pub fn scan_content(content: &str, file_date: NaiveDate) -> ScanResult {
    let mut result = ScanResult::default();
    let mut state = ScanState::NoSection;

    for (idx, line) in content.lines().enumerate() {
        if let Some(label) = header_label(line) {
            state = ScanState::on_header(&label);
            continue;
        }

        let Some(section) = state.section() else {
            continue;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(raw) = match_line(line) else {
            result.skipped += 1;
            continue;
        };

        match resolve(&raw, section, file_date, line) {
            Ok(entry) => {
                tracing::debug!(
                    line = idx + 1,
                    segment = %entry.segment,
                    start = %entry.start_dt,
                    category = %entry.category,
                    "parsed entry"
                );
                result.entries.push(entry);
            }
            Err(error) => result.errors.push(LineError {
                line_number: idx + 1,
                line: line.trim().to_string(),
                error,
            }),
        }
    }

    result
}
