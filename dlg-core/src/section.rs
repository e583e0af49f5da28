//! Diary sections and the header-driven state machine that tracks them.
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the three fixed subdivisions of a day file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Yesterday,
    Plan,
    Actual,
}

/// Where the scanner currently is inside a day file.
///
/// Starts at `NoSection` and only changes on a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    NoSection,
    Yesterday,
    Plan,
    Actual,
}

impl ScanState {
    /// The transition taken on a header line. Unknown labels leave every section.
    pub fn on_header(label: &str) -> Self {
        match Section::from_str(label) {
            Ok(Section::Yesterday) => Self::Yesterday,
            Ok(Section::Plan) => Self::Plan,
            Ok(Section::Actual) => Self::Actual,
            Err(_) => Self::NoSection,
        }
    }

    pub fn section(self) -> Option<Section> {
        match self {
            Self::NoSection => None,
            Self::Yesterday => Some(Section::Yesterday),
            Self::Plan => Some(Section::Plan),
            Self::Actual => Some(Section::Actual),
        }
    }
}

/// Returns the lowercased label if `line` is a backtick-delimited header
/// such as `` `Yesterday` ``. A lone backtick is a header with an empty label.
pub fn header_label(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.starts_with('`') && trimmed.ends_with('`') {
        let label = trimmed.trim_matches(|c: char| c == '`' || c == ' ');
        Some(label.to_lowercase())
    } else {
        None
    }
}
