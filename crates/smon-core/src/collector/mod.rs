//! Kernel counter sampling from the `/proc` filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                       Sampler                         │
//! │  ┌───────────────────┐   ┌─────────────────────────┐  │
//! │  │  ProcessSampler   │   │     SystemSampler       │  │
//! │  │  - /proc/[pid]/*  │   │  - /proc/stat           │  │
//! │  └─────────┬─────────┘   │  - /proc/meminfo        │  │
//! │            │             │  - /proc/mounts+statvfs │  │
//! │            │             │  - /proc/net/dev        │  │
//! │            │             └────────────┬────────────┘  │
//! │            └─────────────┬────────────┘               │
//! │                   ┌──────▼──────┐                     │
//! │                   │ FileSystem  │ (trait)             │
//! │                   └──────┬──────┘                     │
//! └──────────────────────────┼────────────────────────────┘
//!               ┌────────────┴────────────┐
//!        ┌──────▼──────┐           ┌──────▼──────┐
//!        │   RealFs    │           │   MockFs    │
//!        │  (Linux)    │           │  (testing)  │
//!        └─────────────┘           └─────────────┘
//! ```
//!
//! Every sampler call performs exactly one read of its kernel interface.
//! [`Sampler::sample`] degrades per-subsystem failures into empty sections
//! so the dashboard keeps running on partial data.

pub mod mock;
pub mod parser;
mod process;
mod system;
pub mod traits;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::TickSample;

pub use mock::MockFs;
pub use parser::ParseError;
pub use process::ProcessSampler;
pub use system::SystemSampler;
pub use traits::{FileSystem, FsUsage, RealFs};

/// Error type for sampling failures.
#[derive(Debug)]
pub enum CollectError {
    /// I/O error reading a kernel interface.
    Io(std::io::Error),
    /// Malformed content in a kernel interface.
    Parse(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Io(e) => write!(f, "I/O error: {}", e),
            CollectError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for CollectError {}

impl From<std::io::Error> for CollectError {
    fn from(e: std::io::Error) -> Self {
        CollectError::Io(e)
    }
}

impl From<ParseError> for CollectError {
    fn from(e: ParseError) -> Self {
        CollectError::Parse(e.message)
    }
}

/// Combined sampler producing one [`TickSample`] per tick.
pub struct Sampler<F: FileSystem + Clone> {
    system: SystemSampler<F>,
    process: ProcessSampler<F>,
}

impl<F: FileSystem + Clone> Sampler<F> {
    /// Creates a sampler reading from `proc_path` (usually "/proc").
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        let proc_path = proc_path.into();
        Self {
            system: SystemSampler::new(fs.clone(), &proc_path),
            process: ProcessSampler::new(fs, &proc_path),
        }
    }

    /// Verifies that the required kernel interface is present.
    ///
    /// The aggregate CPU counters are the one interface the dashboard cannot
    /// run without; everything else degrades per-section.
    pub fn probe(fs: &F, proc_path: &str) -> Result<(), CollectError> {
        let stat = format!("{}/stat", proc_path);
        fs.read_to_string(Path::new(&stat))?;
        Ok(())
    }

    /// Collects one complete sample.
    ///
    /// A subsystem whose read fails contributes its empty default and is
    /// logged at debug; the failure affects that section for this tick only.
    pub fn sample(&self) -> TickSample {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let cpu = self.system.sample_cpu().unwrap_or_else(|e| {
            tracing::debug!("cpu sample unavailable: {}", e);
            Default::default()
        });
        let memory = self.system.sample_memory().unwrap_or_else(|e| {
            tracing::debug!("memory sample unavailable: {}", e);
            Default::default()
        });
        let disk = self.system.sample_disk().unwrap_or_else(|e| {
            tracing::debug!("disk sample unavailable: {}", e);
            Default::default()
        });
        let network = self.system.sample_network().unwrap_or_else(|e| {
            tracing::debug!("network sample unavailable: {}", e);
            Default::default()
        });
        let processes = self.process.sample_all().unwrap_or_else(|e| {
            tracing::debug!("process sample unavailable: {}", e);
            Default::default()
        });
        let identity = self.system.sample_identity();

        TickSample {
            timestamp,
            cpu,
            memory,
            disk,
            network,
            processes,
            identity,
        }
    }
}
