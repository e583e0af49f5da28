//! Turns a matched line into a fully resolved [`Entry`].
use crate::entry::Entry;
use crate::grammar::RawMatch;
use crate::section::Section;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static DECIMAL_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d$").expect("valid decimal digit regex"));

/// Why a line that matched the grammar could not become an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("invalid time `{0}`, expected a 24-hour time `HH:MM`")]
    MalformedTime(String),
    #[error("no category in tag `@{0}`")]
    EmptyCategory(String),
}

/// Resolves `raw` found under `section` of the file dated `file_date`.
///
/// `line` is the source line; it is stored trimmed as `raw_line`.
pub fn resolve(
    raw: &RawMatch<'_>,
    section: Section,
    file_date: NaiveDate,
    line: &str,
) -> Result<Entry, ResolveError> {
    let start = parse_time(raw.start)?;
    let end = match raw.end {
        Some(end) => parse_time(end)?,
        None => start,
    };

    let category = normalize_category(raw.cat);
    if category.is_empty() {
        return Err(ResolveError::EmptyCategory(raw.cat.to_string()));
    }

    let date = anchor_date(section, file_date, start);
    let (start_dt, end_dt) = interval(date, start, end);

    Ok(Entry {
        date,
        segment: section,
        start_dt,
        end_dt,
        duration_minutes: duration_minutes(start_dt, end_dt),
        category,
        activity_flag: raw.flag,
        description: raw.desc.trim().to_string(),
        raw_line: line.trim().to_string(),
    })
}

/// Picks the day an entry belongs to.
///
/// `yesterday` entries from noon onwards are the previous evening; earlier ones
/// are the small hours of the file's own day.
pub fn anchor_date(section: Section, file_date: NaiveDate, start: NaiveTime) -> NaiveDate {
    match section {
        Section::Yesterday if start >= yesterday_cutoff() => file_date - Duration::days(1),
        _ => file_date,
    }
}

/// Entries under `yesterday` starting at or after this time belong to the day before the file.
fn yesterday_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).expect("valid time")
}

/// Combines times with `date`; an end before the start rolls over to the next day.
pub fn interval(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> (NaiveDateTime, NaiveDateTime) {
    let start_dt = date.and_time(start);
    let mut end_dt = date.and_time(end);
    if end_dt < start_dt {
        end_dt += Duration::days(1);
    }
    (start_dt, end_dt)
}

pub fn duration_minutes(start_dt: NaiveDateTime, end_dt: NaiveDateTime) -> Option<i64> {
    if start_dt == end_dt {
        None
    } else {
        Some((end_dt - start_dt).num_minutes())
    }
}

/// `"work&&study&"` -> `"work,study"`.
pub fn normalize_category(raw: &str) -> String {
    raw.split('&')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_time(hhmm: &str) -> Result<NaiveTime, ResolveError> {
    let malformed = || ResolveError::MalformedTime(hhmm.to_string());
    let (h, m) = hhmm.split_once(':').ok_or_else(malformed)?;
    let h = parse_number(h).ok_or_else(malformed)?;
    let m = parse_number(m).ok_or_else(malformed)?;
    NaiveTime::from_hms_opt(h, m, 0).ok_or_else(malformed)
}

/// Reads a run of decimal digits from any script, e.g. `"０８"` -> `8`.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() {
        return None;
    }
    digits
        .chars()
        .try_fold(0u32, |acc, c| acc.checked_mul(10)?.checked_add(digit_value(c)?))
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

// Unicode decimal digits come in contiguous blocks that start at a zero, so
// the value is the distance to the start of the block, modulo ten.
fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let mut zero = c as u32;
    while let Some(prev) = char::from_u32(zero - 1).filter(|p| is_decimal_digit(*p)) {
        zero = prev as u32;
    }
    Some((c as u32 - zero) % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Flag, match_line};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn resolve_line(line: &str, section: Section, file_date: NaiveDate) -> Result<Entry, ResolveError> {
        let raw = match_line(line).expect("line should match the grammar");
        resolve(&raw, section, file_date, line)
    }

    #[test]
    fn yesterday_evening_anchors_on_previous_day() {
        let e = resolve_line("23:30 @sleep: bed", Section::Yesterday, date(2025, 7, 14)).unwrap();
        assert_eq!(e.date, date(2025, 7, 13));
        assert_eq!(e.start_dt, dt("2025-07-13 23:30"));
    }

    #[test]
    fn yesterday_morning_anchors_on_file_day() {
        let e = resolve_line("06:00 @sleep: woke up", Section::Yesterday, date(2025, 7, 14)).unwrap();
        assert_eq!(e.date, date(2025, 7, 14));
    }

    #[test]
    fn noon_is_the_exact_cutoff() {
        let file_date = date(2025, 7, 14);
        let at_noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let before = NaiveTime::from_hms_opt(11, 59, 0).unwrap();
        assert_eq!(anchor_date(Section::Yesterday, file_date, at_noon), date(2025, 7, 13));
        assert_eq!(anchor_date(Section::Yesterday, file_date, before), file_date);
    }

    #[test]
    fn plan_and_actual_always_anchor_on_file_day() {
        let file_date = date(2025, 7, 14);
        let late = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        assert_eq!(anchor_date(Section::Plan, file_date, late), file_date);
        assert_eq!(anchor_date(Section::Actual, file_date, late), file_date);
    }

    #[test]
    fn span_across_midnight_wraps_forward() {
        let e = resolve_line("23:00-00:30 @leisure: movie", Section::Actual, date(2025, 7, 14)).unwrap();
        assert_eq!(e.start_dt, dt("2025-07-14 23:00"));
        assert_eq!(e.end_dt, dt("2025-07-15 00:30"));
        assert_eq!(e.duration_minutes, Some(90));
    }

    #[test]
    fn yesterday_span_across_midnight_uses_previous_anchor() {
        let e = resolve_line("22:45-01:15 @study: exam prep", Section::Yesterday, date(2025, 1, 1)).unwrap();
        assert_eq!(e.start_dt, dt("2024-12-31 22:45"));
        assert_eq!(e.end_dt, dt("2025-01-01 01:15"));
        assert_eq!(e.duration_minutes, Some(150));
    }

    #[test]
    fn point_event_has_no_duration() {
        let e = resolve_line("07:15 @health: vitamins", Section::Actual, date(2025, 7, 14)).unwrap();
        assert!(e.is_point_event());
        assert_eq!(e.start_dt, e.end_dt);
        assert_eq!(e.duration_minutes, None);
    }

    #[test]
    fn explicit_equal_times_are_a_point_event() {
        let e = resolve_line("07:15-07:15 @health: vitamins", Section::Plan, date(2025, 7, 14)).unwrap();
        assert_eq!(e.duration_minutes, None);
    }

    #[test]
    fn multi_category_line_with_flag() {
        let line = "3. 09:00-11:00 `@work&study` : desc done";
        let e = resolve_line(line, Section::Actual, date(2025, 7, 14)).unwrap();
        assert_eq!(e.category, "work,study");
        assert_eq!(e.categories().collect::<Vec<_>>(), ["work", "study"]);
        assert_eq!(e.activity_flag, Some(Flag::Done));
        assert_eq!(e.description, "desc");
        assert_eq!(e.segment, Section::Actual);
        assert_eq!(e.duration_minutes, Some(120));
    }

    #[test]
    fn full_width_times_resolve() {
        let e = resolve_line("０８:００-０９:３０ @work: a", Section::Actual, date(2025, 7, 14)).unwrap();
        assert_eq!(e.start_dt, dt("2025-07-14 08:00"));
        assert_eq!(e.end_dt, dt("2025-07-14 09:30"));
        assert_eq!(e.duration_minutes, Some(90));
    }

    #[test]
    fn digit_values_from_other_scripts() {
        assert_eq!(parse_number("０９"), Some(9));
        assert_eq!(parse_number("٢٣"), Some(23));
        assert_eq!(parse_number("४५"), Some(45));
        assert_eq!(parse_number("1٥"), Some(15));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1a"), None);
    }

    #[test]
    fn full_width_out_of_range_is_malformed() {
        let err = resolve_line("２５:００ @work: a", Section::Actual, date(2025, 7, 14)).unwrap_err();
        assert_eq!(err, ResolveError::MalformedTime("２５:００".to_string()));
    }

    #[test]
    fn raw_line_is_trimmed() {
        let line = "  08:00 @work: standup  ";
        let e = resolve_line(line, Section::Plan, date(2025, 7, 14)).unwrap();
        assert_eq!(e.raw_line, "08:00 @work: standup");
    }

    #[test]
    fn invalid_hour_is_malformed_time() {
        let err = resolve_line("25:00 @work: late", Section::Actual, date(2025, 7, 14)).unwrap_err();
        assert_eq!(err, ResolveError::MalformedTime("25:00".to_string()));
    }

    #[test]
    fn invalid_end_minute_is_malformed_time() {
        let err = resolve_line("08:00-09:75 @work: x", Section::Actual, date(2025, 7, 14)).unwrap_err();
        assert_eq!(err, ResolveError::MalformedTime("09:75".to_string()));
    }

    #[test]
    fn empty_tag_list_is_rejected() {
        let err = resolve_line("08:00 @&: nothing", Section::Actual, date(2025, 7, 14)).unwrap_err();
        assert_eq!(err, ResolveError::EmptyCategory("&".to_string()));
    }

    #[test]
    fn category_normalization_drops_blanks_and_keeps_order() {
        assert_eq!(normalize_category("study&&work&"), "study,work");
        assert_eq!(normalize_category("a"), "a");
        assert_eq!(normalize_category("&"), "");
    }

    #[test]
    fn category_normalization_is_idempotent() {
        for raw in ["work&study", "b&a&c", "solo", "x&&y"] {
            let once = normalize_category(raw);
            assert_eq!(normalize_category(&once), once);
        }
    }

    #[test]
    fn end_never_precedes_start() {
        let file_date = date(2025, 3, 9);
        for line in [
            "00:00-23:59 @a: x",
            "23:59-00:00 @a: x",
            "12:00-11:59 @a: x",
            "05:00 @a: x",
        ] {
            for section in [Section::Yesterday, Section::Plan, Section::Actual] {
                let e = resolve_line(line, section, file_date).unwrap();
                assert!(e.end_dt >= e.start_dt, "{line} in {section}");
            }
        }
    }

    #[test]
    fn resolved_fields_rebuild_an_equivalent_line() {
        let lines = [
            "1. 08:00-09:30 `@work&study` : write report `planned-OnTime`",
            "14:00 @health：walk in the park extra",
            "20:00-21:00 @leisure: read a book",
        ];
        for line in lines {
            let e = resolve_line(line, Section::Actual, date(2025, 7, 14)).unwrap();
            let mut rebuilt = format!(
                "{}-{} @{}: {}",
                e.start_dt.format("%H:%M"),
                e.end_dt.format("%H:%M"),
                e.category.replace(',', "&"),
                e.description
            );
            if let Some(flag) = e.activity_flag {
                rebuilt.push_str(&format!(" {flag}"));
            }
            let again = resolve_line(&rebuilt, Section::Actual, date(2025, 7, 14)).unwrap();
            assert_eq!(again.category, e.category);
            assert_eq!(again.description, e.description);
            assert_eq!(again.activity_flag, e.activity_flag);
            assert_eq!(again.start_dt, e.start_dt);
            assert_eq!(again.end_dt, e.end_dt);
        }
    }
}
