//! The dashboard render loop.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::collector::{FileSystem, Sampler};
use crate::metrics::{TOP_PROCESSES, derive};
use crate::rates::RateEngine;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Longest one blocking wait for an event may last before the shutdown flag
/// is re-checked.
const SHUTDOWN_POLL: Duration = Duration::from_millis(250);

/// Scoped terminal-state acquisition.
///
/// Raw mode, alternate screen and hidden cursor are taken on entry and
/// restored in `Drop`, so restoration runs on the quit-key path, the signal
/// path, error returns and panics alike.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    }
}

/// Ties sampling, rate derivation and rendering together on a fixed-interval
/// cadence until cancelled.
pub struct App<F: FileSystem + Clone> {
    sampler: Sampler<F>,
    rates: RateEngine,
    state: AppState,
    last_sample: Option<Instant>,
}

impl<F: FileSystem + Clone> App<F> {
    pub fn new(sampler: Sampler<F>, interval_secs: u64) -> Self {
        Self {
            sampler,
            rates: RateEngine::new(),
            state: AppState::new(interval_secs.max(1)),
            last_sample: None,
        }
    }

    /// Runs the dashboard until a quit key is pressed or `shutdown` is set
    /// by a signal handler. The terminal is restored on every exit path.
    pub fn run(mut self, shutdown: Arc<AtomicBool>) -> io::Result<()> {
        let tick_rate = Duration::from_secs(self.state.interval_secs);
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        let events = EventHandler::new(tick_rate);

        // warm-up tick: draws zeros for delta metrics, records baselines
        self.advance(tick_rate);

        loop {
            terminal.draw(|frame| render(frame, &self.state))?;

            if shutdown.load(Ordering::SeqCst) {
                break;
            }
            match events.next(SHUTDOWN_POLL) {
                Ok(Event::Tick) => self.advance(tick_rate),
                Ok(Event::Key(key)) => {
                    if handle_key(key) == KeyAction::Quit {
                        break;
                    }
                }
                Ok(Event::Resize) => {}
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(())
    }

    /// One tick: sample every source, derive metrics, publish to the render
    /// state. A failed subsystem degrades its own section for this tick only.
    fn advance(&mut self, tick_rate: Duration) {
        let now = Instant::now();
        let elapsed = self
            .last_sample
            .replace(now)
            .map(|prev| now.duration_since(prev).as_secs_f64())
            .unwrap_or_else(|| tick_rate.as_secs_f64());

        let sample = self.sampler.sample();
        self.state.metrics = derive(&sample, &mut self.rates, elapsed, TOP_PROCESSES);
        self.state.identity = sample.identity;
    }
}
