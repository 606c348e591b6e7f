//! Event handling for the render loop.
//!
//! A separate thread polls the terminal in sub-second slices, forwarding
//! keypresses immediately and emitting a tick once the full refresh interval
//! has elapsed. The slice length bounds how long a quit key or shutdown
//! signal can go unnoticed.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Upper bound on one blocking poll of the terminal.
const POLL_SLICE: Duration = Duration::from_millis(250);

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick for data refresh.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
}

/// Event handler that polls for terminal events in a separate thread.
pub struct EventHandler {
    rx: Receiver<Event>,
    /// Kept alive to prevent channel closure.
    _tx: Sender<Event>,
}

impl EventHandler {
    /// Creates a new event handler with the given tick interval.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed()).min(POLL_SLICE);
                if event::poll(timeout).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let event = match evt {
                        CrosstermEvent::Key(key) => Some(Event::Key(key)),
                        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(event) = event
                        && event_tx.send(event).is_err()
                    {
                        break;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                }
            }
        });

        Self { rx, _tx: tx }
    }

    /// Receives the next event, waiting at most `timeout`.
    ///
    /// The bounded wait lets the caller re-check its shutdown flag at
    /// sub-second granularity even when no key is pressed.
    pub fn next(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}
