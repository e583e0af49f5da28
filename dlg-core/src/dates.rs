use chrono::NaiveDate;
use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

/// Relative day names accepted wherever a date is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Keyword {
    Today,
    Yesterday,
}

/// Parses `today`, `yesterday` or a `YYYY-MM-DD` date relative to `reference_date`.
pub fn parse_date_arg(input: &str, reference_date: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim();
    match Keyword::from_str(input) {
        Ok(Keyword::Today) => Some(reference_date),
        Ok(Keyword::Yesterday) => reference_date.pred_opt(),
        Err(_) => NaiveDate::parse_from_str(input, "%Y-%m-%d").ok(),
    }
}

/// Generates a vector of `NaiveDate`s, inclusive of the start and end dates.
/// If `start` is after `end`, the resulting vector will be empty.
pub fn get_dates_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current.filter(|date| *date <= end) {
        dates.push(date);
        current = date.succ_opt();
    }
    dates
}
