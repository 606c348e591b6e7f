//! Banner and host-identity header.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_uptime;
use crate::model::SysInfo;
use crate::tui::style::Styles;

fn banner_line() -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("smon {}", env!("CARGO_PKG_VERSION")),
            Styles::banner(),
        ),
        Span::styled("  server monitor", Styles::dim()),
    ])
}

fn identity_lines(id: &SysInfo) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled("host:   ", Styles::dim()),
            Span::styled(id.hostname.clone(), Styles::default()),
            Span::styled("    time: ", Styles::dim()),
            Span::styled(id.local_time.clone(), Styles::default()),
        ]),
        Line::from(vec![
            Span::styled("os:     ", Styles::dim()),
            Span::styled(id.os_name.clone(), Styles::default()),
            Span::styled("    kernel: ", Styles::dim()),
            Span::styled(id.kernel.clone(), Styles::default()),
        ]),
        Line::from(vec![
            Span::styled("uptime: ", Styles::dim()),
            Span::styled(format_uptime(id.uptime_secs), Styles::default()),
            Span::styled("    load: ", Styles::dim()),
            Span::styled(
                format!("{:.2} {:.2} {:.2}", id.load1, id.load5, id.load15),
                Styles::default(),
            ),
        ]),
    ]
}

pub(in crate::tui) fn render_header(frame: &mut Frame, area: Rect, id: &SysInfo) {
    let mut lines = vec![banner_line()];
    lines.extend(identity_lines(id));
    frame.render_widget(Paragraph::new(lines), area);
}
