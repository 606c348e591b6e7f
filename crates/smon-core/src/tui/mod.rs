//! Terminal user interface for the smon dashboard.
//!
//! A fixed-layout, flicker-free frame redrawn in place at the configured
//! interval. The render loop, input handling and terminal-state guard all
//! live here; the binary only supplies an interval and a shutdown flag.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::App;
pub use state::AppState;
