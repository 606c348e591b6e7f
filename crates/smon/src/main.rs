//! smon - real-time server monitor dashboard.
//!
//! Samples kernel resource counters once per tick and renders a fixed-layout
//! colored dashboard in the terminal until `q` is pressed or a termination
//! signal arrives.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[cfg(not(target_os = "linux"))]
use smon_core::collector::MockFs;
#[cfg(target_os = "linux")]
use smon_core::collector::RealFs;
use smon_core::collector::Sampler;
use smon_core::tui::App;

/// Real-time server monitor dashboard.
#[derive(Parser)]
#[command(name = "smon", about = "Real-time server monitor", version)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,
}

/// Logging is driven by RUST_LOG only and goes to stderr; the alternate
/// screen owns stdout.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging();

    #[cfg(target_os = "linux")]
    let fs = RealFs::new();
    // no procfs off Linux: run against the built-in demo fixture
    #[cfg(not(target_os = "linux"))]
    let fs = MockFs::typical_system();

    // The one fatal condition: the kernel counter interface is absent.
    if let Err(e) = Sampler::probe(&fs, "/proc") {
        eprintln!("Error: required /proc interface is not readable: {}", e);
        std::process::exit(1);
    }

    // Termination signals take the same shutdown path as the quit key, so
    // terminal restoration is guaranteed either way.
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        warn!("failed to set signal handler: {}", e);
    }

    let sampler = Sampler::new(fs, "/proc");
    let app = App::new(sampler, args.interval);
    if let Err(e) = app.run(shutdown) {
        eprintln!("Error running dashboard: {}", e);
        std::process::exit(1);
    }
}
