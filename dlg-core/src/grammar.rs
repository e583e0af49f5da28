//! Line grammar for checklist diary entries.
//!
//! A diary entry is a single line of the form
//!
//! ```text
//! [12.] HH:MM[-HH:MM] [`]@tag[&tag...][`] : description [`flag`]
//! ```
//!
//! Anything that does not fit is simply "not an entry".
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Status tag that may close an entry line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Flag {
    #[strum(serialize = "done")]
    #[serde(rename = "done")]
    Done,
    #[strum(serialize = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[strum(serialize = "planned-OnTime")]
    #[serde(rename = "planned-OnTime")]
    PlannedOnTime,
    #[strum(serialize = "planned-WrongTime")]
    #[serde(rename = "planned-WrongTime")]
    PlannedWrongTime,
    #[strum(serialize = "extra")]
    #[serde(rename = "extra")]
    Extra,
}

/// Raw fields of a matched line, borrowed from the line itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub start: &'a str,
    pub end: Option<&'a str>,
    /// Tag string as written, possibly `&`-joined (e.g. `work&study`).
    pub cat: &'a str,
    pub desc: &'a str,
    pub flag: Option<Flag>,
}

// The description is lazy so a trailing flag word is captured as `flag`.
static ENTRY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^\s*
        (?:\d+\.\s*)?
        (?P<start>\d{1,2}:\d{2})
        (?:-(?P<end>\d{1,2}:\d{2}))?
        \s+
        `?@(?P<cat>[^\s:`]+)`?
        \s*[：:]\s*
        (?P<desc>.*?)
        (?:\s+`?(?P<flag>(?i:done|pending|planned-OnTime|planned-WrongTime|extra))`?)?
        \s*$
        ",
    )
    .expect("entry grammar is a valid regex")
});

/// Matches a whole line against the entry grammar.
///
/// Returns `None` when the line is not an entry. This never fails.
pub fn match_line(line: &str) -> Option<RawMatch<'_>> {
    let caps = ENTRY_RE.captures(line)?;
    let start = caps.name("start")?.as_str();
    let cat = caps.name("cat")?.as_str();
    let desc = caps.name("desc").map(|m| m.as_str().trim()).unwrap_or("");
    Some(RawMatch {
        start,
        end: caps.name("end").map(|m| m.as_str()),
        cat,
        desc,
        flag: caps
            .name("flag")
            .and_then(|m| Flag::from_str(m.as_str()).ok()),
    })
}
