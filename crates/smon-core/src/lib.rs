//! smon-core — sampling and rendering core for the smon dashboard.
//!
//! Provides:
//! - `collector` — kernel counter sampling from the `/proc` filesystem
//! - `model` — per-tick sample types
//! - `rates` — delta/rate computation over consecutive samples
//! - `metrics` — derived per-tick metrics for rendering
//! - `fmt` — shared formatting helpers (bytes, rates, duration)
//!
//! With `tui` feature (default):
//! - `tui` — terminal rendering (ratatui/crossterm), input, render loop

pub mod collector;
pub mod fmt;
pub mod metrics;
pub mod model;
pub mod rates;

#[cfg(feature = "tui")]
pub mod tui;
