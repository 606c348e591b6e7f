//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Percent at or above which a gauge turns the danger color.
pub const PCT_HIGH: u8 = 85;
/// Percent at or above which a gauge turns the warning color.
pub const PCT_WARN: u8 = 60;

/// Color palette.
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const BANNER: Color = Color::Cyan;

    pub const OK: Color = Color::Green;
    pub const WARN: Color = Color::Yellow;
    pub const HIGH: Color = Color::Red;

    pub const SECTION: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG)
    }

    /// Dimmed text (labels, details).
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Top banner.
    pub fn banner() -> Style {
        Style::default()
            .fg(Theme::BANNER)
            .add_modifier(Modifier::BOLD)
    }

    /// Section/table titles.
    pub fn section() -> Style {
        Style::default()
            .fg(Theme::SECTION)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row.
    pub fn table_header() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Help/footer text.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Highlighted keys in the footer.
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Color band for a percentage: >= 85 danger, >= 60 warning, else normal.
    pub fn for_percent(pct: u8) -> Style {
        if pct >= PCT_HIGH {
            Style::default()
                .fg(Theme::HIGH)
                .add_modifier(Modifier::BOLD)
        } else if pct >= PCT_WARN {
            Style::default().fg(Theme::WARN)
        } else {
            Style::default().fg(Theme::OK)
        }
    }
}
