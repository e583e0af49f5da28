use dlg_core::Flag;
use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

/// Colors for each part of a printed entry, plus the markdown skin used for
/// headings and messages.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub heading: Color,
    pub date: Color,
    pub span: Color,
    pub muted: Color,
    pub category: Color,
    pub code_bg: Color,
    done: Color,
    pending: Color,
    off_plan: Color,
    extra: Color,
}

impl Palette {
    /// One Dark.
    pub const DARK: Palette = Palette {
        text: rgb(0xABB2BF),
        heading: rgb(0xE06C75),
        date: rgb(0x56B6C2),
        span: rgb(0x61AFEF),
        muted: rgb(0x5C6370),
        category: rgb(0x98C379),
        code_bg: rgb(0x282C34),
        done: rgb(0x98C379),
        pending: rgb(0xE5C07B),
        off_plan: rgb(0xE06C75),
        extra: rgb(0xC678DD),
    };

    pub fn flag(&self, flag: Flag) -> Color {
        match flag {
            Flag::Done | Flag::PlannedOnTime => self.done,
            Flag::Pending => self.pending,
            Flag::PlannedWrongTime => self.off_plan,
            Flag::Extra => self.extra,
        }
    }

    pub fn skin(&self) -> MadSkin {
        let mut skin = MadSkin::default();
        skin.paragraph.set_fg(self.text);
        skin.bold.set_fg(self.text);
        skin.italic.set_fg(self.muted);

        skin.headers[0].set_fg(self.heading);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.table.set_fg(self.muted);
        skin.bullet.set_fg(self.heading);
        skin.inline_code.set_fg(self.category);
        skin.inline_code.set_bg(self.code_bg);
        skin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_splits_hex_channels() {
        assert_eq!(rgb(0x56B6C2), Color::Rgb { r: 0x56, g: 0xB6, b: 0xC2 });
    }

    #[test]
    fn flags_share_colors_by_outcome() {
        let p = Palette::DARK;
        assert_eq!(p.flag(Flag::Done), p.flag(Flag::PlannedOnTime));
        assert_ne!(p.flag(Flag::Pending), p.flag(Flag::PlannedWrongTime));
        assert_ne!(p.flag(Flag::Extra), p.flag(Flag::Done));
    }
}
