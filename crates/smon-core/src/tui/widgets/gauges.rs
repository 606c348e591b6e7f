//! Percentage gauges: CPU, memory, swap and disk bars.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::{format_kb, truncate};
use crate::metrics::DerivedMetrics;
use crate::tui::style::Styles;

/// Width of every gauge bar in glyphs.
const BAR_WIDTH: usize = 30;

/// Width of the gauge label column.
const LABEL_WIDTH: usize = 7;

/// Builds a fixed-width bar of filled/empty glyphs proportional to
/// `percent`. 0% draws no filled glyph and 100% exactly fills the bar.
pub(in crate::tui) fn bar(percent: u8, width: usize) -> String {
    let pct = percent.min(100) as usize;
    let filled = width * pct / 100;
    let mut s = String::with_capacity(width * 3);
    for _ in 0..filled {
        s.push('█');
    }
    for _ in filled..width {
        s.push('░');
    }
    s
}

/// One gauge line: `LABEL  [████░░] 45%  detail`.
fn gauge_line(label: &str, percent: u8, detail: String) -> Line<'static> {
    let pct = percent.min(100);
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), Styles::dim()),
        Span::raw("["),
        Span::styled(bar(pct, BAR_WIDTH), Styles::for_percent(pct)),
        Span::raw("]"),
        Span::styled(format!("{:>4}%", pct), Styles::for_percent(pct)),
        Span::raw("  "),
        Span::styled(detail, Styles::dim()),
    ])
}

fn placeholder_line(label: &str, text: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), Styles::dim()),
        Span::styled(text.to_string(), Styles::dim()),
    ])
}

fn cpu_lines(m: &DerivedMetrics) -> Vec<Line<'static>> {
    let mut lines = vec![gauge_line("CPU", m.cpu_total, "all cores".to_string())];
    for (id, pct) in &m.cpu_cores {
        lines.push(gauge_line(&format!("cpu{}", id), *pct, String::new()));
    }
    lines
}

fn memory_lines(m: &DerivedMetrics) -> Vec<Line<'static>> {
    let mem = gauge_line(
        "MEM",
        m.memory.percent,
        format!(
            "{} / {}",
            format_kb(m.memory.used_kb),
            format_kb(m.memory.total_kb)
        ),
    );
    let swap = match &m.swap {
        Some(s) => gauge_line(
            "SWP",
            s.percent,
            format!("{} / {}", format_kb(s.used_kb), format_kb(s.total_kb)),
        ),
        None => placeholder_line("SWP", "N/A"),
    };
    vec![mem, swap]
}

fn disk_lines(m: &DerivedMetrics) -> Vec<Line<'static>> {
    if m.disks.is_empty() {
        return vec![placeholder_line("DSK", "no disk data")];
    }
    m.disks
        .iter()
        .map(|d| {
            gauge_line(
                &truncate(&d.mount_point, LABEL_WIDTH - 1),
                d.percent,
                format!("{} / {}", format_kb(d.used_kb), format_kb(d.size_kb)),
            )
        })
        .collect()
}

pub(in crate::tui) fn render_cpu(frame: &mut Frame, area: Rect, m: &DerivedMetrics) {
    frame.render_widget(Paragraph::new(cpu_lines(m)), area);
}

pub(in crate::tui) fn render_memory(frame: &mut Frame, area: Rect, m: &DerivedMetrics) {
    frame.render_widget(Paragraph::new(memory_lines(m)), area);
}

pub(in crate::tui) fn render_disks(frame: &mut Frame, area: Rect, m: &DerivedMetrics) {
    frame.render_widget(Paragraph::new(disk_lines(m)), area);
}
