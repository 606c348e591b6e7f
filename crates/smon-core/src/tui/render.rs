//! Frame layout and rendering.
//!
//! Section order is fixed: banner/identity, CPU, memory, disk, network,
//! top-process tables, footer. The whole frame is rewritten into ratatui's
//! back buffer every tick and diffed against the previous frame, so the
//! terminal is updated in place without clearing or scrolling, and a section
//! that shrinks leaves no stale trailing content.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::AppState;
use super::widgets::{
    render_cpu, render_disks, render_footer, render_header, render_memory, render_network,
    render_processes,
};

/// Renders one complete frame from the current state.
pub(super) fn render(frame: &mut Frame, state: &AppState) {
    let m = &state.metrics;
    let cpu_height = 1 + m.cpu_cores.len() as u16;
    let disk_height = m.disks.len().max(1) as u16;

    let chunks = Layout::vertical([
        Constraint::Length(4), // banner + identity
        Constraint::Length(cpu_height),
        Constraint::Length(2), // MEM + SWP
        Constraint::Length(disk_height),
        Constraint::Length(1), // NET
        Constraint::Min(6),    // process tables
        Constraint::Length(1), // footer
    ])
    .split(frame.area());

    render_header(frame, chunks[0], &state.identity);
    render_cpu(frame, chunks[1], m);
    render_memory(frame, chunks[2], m);
    render_disks(frame, chunks[3], m);
    render_network(frame, chunks[4], m.network.as_ref());
    render_processes(frame, chunks[5], m);
    render_footer(frame, chunks[6], state.interval_secs);
}
