use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn day_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y-%m-%d"))
}

/// `{root}/YYYY-MM/YYYY-MM-DD`
pub fn day_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y-%m").to_string())
        .join(date.format("%Y-%m-%d").to_string())
}

pub fn day_path(root: &Path, date: NaiveDate) -> PathBuf {
    day_dir(root, date).join(day_file_name(date))
}

/// The nominal date of a day file, taken from its `YYYY-MM-DD` stem.
pub fn file_date_from_path(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, "%Y-%m-%d").ok()
}
