//! Footer line with quit hint and refresh interval.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;

fn footer_line(interval_secs: u64) -> Line<'static> {
    Line::from(vec![
        Span::styled("q", Styles::help_key()),
        Span::styled(":quit", Styles::help()),
        Span::styled(format!("   refresh: {}s", interval_secs), Styles::help()),
    ])
}

pub(in crate::tui) fn render_footer(frame: &mut Frame, area: Rect, interval_secs: u64) {
    frame.render_widget(Paragraph::new(vec![footer_line(interval_secs)]), area);
}
