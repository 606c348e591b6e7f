//! Network throughput line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::format_bytes_rate;
use crate::metrics::NetRates;
use crate::tui::style::Styles;

fn net_line(net: Option<&NetRates>) -> Line<'static> {
    let label = Span::styled(format!("{:<7}", "NET"), Styles::dim());
    match net {
        Some(rates) => Line::from(vec![
            label,
            Span::styled(rates.interface.clone(), Styles::default()),
            Span::styled("  down: ", Styles::dim()),
            Span::styled(format_bytes_rate(rates.rx_rate), Styles::default()),
            Span::styled("  up: ", Styles::dim()),
            Span::styled(format_bytes_rate(rates.tx_rate), Styles::default()),
        ]),
        None => Line::from(vec![
            label,
            Span::styled("no active interface", Styles::dim()),
        ]),
    }
}

pub(in crate::tui) fn render_network(frame: &mut Frame, area: Rect, net: Option<&NetRates>) {
    frame.render_widget(Paragraph::new(vec![net_line(net)]), area);
}
