use super::theme::Palette;
use dlg_core::{Entry, LineError};
use termimad::{MadSkin, crossterm::style::Stylize};

pub struct Renderer {
    skin: MadSkin,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            skin: Palette::DARK.skin(),
            use_color,
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.use_color {
            self.skin.print_text(md);
        } else {
            println!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_entries(&self, entries: &[Entry]) {
        if entries.is_empty() {
            self.print_info("No entries found.");
            return;
        }
        for entry in entries {
            println!("{}", format_entry_line(entry, self.use_color));
        }
    }

    /// Prints per-line problems grouped under a heading. `label` names the file.
    pub fn print_line_errors<'a>(&self, errors: impl IntoIterator<Item = (String, &'a LineError)>) {
        let lines: Vec<String> = errors
            .into_iter()
            .map(|(label, error)| format!("* {label}: {error}"))
            .collect();
        if lines.is_empty() {
            return;
        }
        self.print_md("\n# Skipped lines:");
        for line in lines {
            self.print_md(&line);
        }
    }

    pub fn print_errors<E: std::fmt::Display>(&self, errors: &[E]) {
        if errors.is_empty() {
            return;
        }
        self.print_md("\n# Errors:");
        for error in errors {
            self.print_md(&format!("* {error}"));
        }
    }
}

/// `2025-07-13 23:00-00:30  90m [yesterday] leisure - movie (done)`
pub fn format_entry_line(entry: &Entry, use_color: bool) -> String {
    let mut date = entry.date.to_string();
    let mut span = if entry.is_point_event() {
        entry.start_dt.format("%H:%M").to_string()
    } else {
        format!(
            "{}-{}",
            entry.start_dt.format("%H:%M"),
            entry.end_dt.format("%H:%M")
        )
    };
    let mut duration = entry
        .duration_minutes
        .map(|m| format!("{m}m"))
        .unwrap_or_else(|| "-".to_string());
    let mut segment = format!("[{}]", entry.segment);
    let mut category = entry.category.clone();
    let mut flag = entry
        .activity_flag
        .map(|f| format!(" ({f})"))
        .unwrap_or_default();

    if use_color {
        let palette = Palette::DARK;
        date = date.with(palette.date).to_string();
        span = span.with(palette.span).to_string();
        duration = duration.with(palette.muted).to_string();
        segment = segment.with(palette.muted).to_string();
        category = category.with(palette.category).to_string();
        if let Some(f) = entry.activity_flag {
            flag = flag.with(palette.flag(f)).to_string();
        }
    }

    format!(
        "{date} {span} {duration} {segment} {category} - {}{flag}",
        entry.description
    )
}
