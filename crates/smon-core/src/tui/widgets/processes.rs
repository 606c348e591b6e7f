//! Top-processes tables.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::truncate;
use crate::metrics::{DerivedMetrics, ProcessRow};
use crate::tui::style::Styles;

/// Widest command string shown in a table row.
const COMMAND_WIDTH: usize = 60;

fn table_lines(title: &str, rows: &[ProcessRow]) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), Styles::section())),
        Line::from(Span::styled(
            format!("{:>7}  {:>4}  {:>4}  {}", "PID", "CPU%", "MEM%", "COMMAND"),
            Styles::table_header(),
        )),
    ];
    for row in rows {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>7}", row.pid), Styles::dim()),
            Span::raw("  "),
            Span::styled(format!("{:>4}", row.cpu_percent), Styles::for_percent(row.cpu_percent)),
            Span::raw("  "),
            Span::styled(format!("{:>4}", row.mem_percent), Styles::for_percent(row.mem_percent)),
            Span::raw("  "),
            Span::styled(truncate(&row.command, COMMAND_WIDTH), Styles::default()),
        ]));
    }
    lines
}

pub(in crate::tui) fn render_processes(frame: &mut Frame, area: Rect, m: &DerivedMetrics) {
    let halves = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    frame.render_widget(
        Paragraph::new(table_lines("TOP BY CPU", &m.top_by_cpu)),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(table_lines("TOP BY MEM", &m.top_by_mem)),
        halves[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn table_has_title_header_and_rows() {
        let rows = vec![
            ProcessRow {
                pid: 1000,
                cpu_percent: 42,
                mem_percent: 3,
                command: "nginx: worker process".to_string(),
            },
            ProcessRow {
                pid: 1,
                cpu_percent: 1,
                mem_percent: 1,
                command: "/sbin/init".to_string(),
            },
        ];
        let lines = table_lines("TOP BY CPU", &rows);
        assert_eq!(lines.len(), 4);
        assert_eq!(text_of(&lines[0]), "TOP BY CPU");
        assert!(text_of(&lines[1]).contains("COMMAND"));
        assert!(text_of(&lines[2]).contains("1000"));
        assert!(text_of(&lines[2]).contains("42"));
        assert!(text_of(&lines[3]).contains("/sbin/init"));
    }

    #[test]
    fn long_commands_are_truncated() {
        let rows = vec![ProcessRow {
            pid: 7,
            cpu_percent: 0,
            mem_percent: 0,
            command: "x".repeat(200),
        }];
        let lines = table_lines("TOP BY MEM", &rows);
        let text = text_of(&lines[2]);
        assert!(text.chars().count() < 100);
        assert!(text.ends_with('…'));
    }
}
