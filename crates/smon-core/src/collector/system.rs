//! System-wide sampler over `/proc` files.
//!
//! Each `sample_*` method performs exactly one read of the corresponding
//! kernel interface per call; there is no caching and no smoothing.

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::model::{CpuSample, DiskSample, MemorySample, MountUsage, NetworkSample, SysInfo};

use super::CollectError;
use super::parser;
use super::traits::FileSystem;

/// Samples system-wide counters through a [`FileSystem`].
pub struct SystemSampler<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> SystemSampler<F> {
    /// Creates a new sampler.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to the proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    fn proc_file(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{}/{}", self.proc_path, name))
    }

    fn read_proc(&self, name: &str) -> Result<String, CollectError> {
        Ok(self.fs.read_to_string(&self.proc_file(name))?)
    }

    /// Samples aggregate and per-core CPU jiffie counters from `/proc/stat`.
    pub fn sample_cpu(&self) -> Result<CpuSample, CollectError> {
        let content = self.read_proc("stat")?;
        Ok(parser::parse_cpu_stat(&content)?)
    }

    /// Samples memory and swap totals from `/proc/meminfo`.
    pub fn sample_memory(&self) -> Result<MemorySample, CollectError> {
        let content = self.read_proc("meminfo")?;
        Ok(parser::parse_meminfo(&content)?)
    }

    /// Samples per-mount disk usage.
    ///
    /// Mount list comes from `/proc/mounts` with the pseudo-filesystem
    /// denylist applied; usage comes from statvfs per retained mount. Rows
    /// whose usage query fails or whose size is zero are discarded.
    pub fn sample_disk(&self) -> Result<DiskSample, CollectError> {
        let content = self.read_proc("mounts")?;
        let mut mounts = Vec::new();

        for entry in parser::parse_mounts(&content) {
            let usage = match self.fs.usage(Path::new(&entry.mount_point)) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!("skipping mount {}: {}", entry.mount_point, e);
                    continue;
                }
            };
            if usage.total_bytes == 0 {
                continue;
            }
            let used_bytes = usage.total_bytes.saturating_sub(usage.avail_bytes);
            let used_percent = (used_bytes * 100 / usage.total_bytes).min(100) as u8;
            mounts.push(MountUsage {
                mount_point: entry.mount_point,
                fs_type: entry.fs_type,
                used_kb: used_bytes / 1024,
                size_kb: usage.total_bytes / 1024,
                used_percent,
            });
        }

        Ok(DiskSample { mounts })
    }

    /// Samples cumulative per-interface byte counters from `/proc/net/dev`.
    /// Loopback is excluded.
    pub fn sample_network(&self) -> Result<NetworkSample, CollectError> {
        let content = self.read_proc("net/dev")?;
        Ok(NetworkSample {
            interfaces: parser::parse_net_dev(&content)?,
        })
    }

    /// Samples host identity for the dashboard header.
    ///
    /// Individual fields degrade to empty/zero when their source is missing;
    /// only a complete failure of every source is an error.
    pub fn sample_identity(&self) -> SysInfo {
        let read_trimmed = |name: &str| -> String {
            self.read_proc(name)
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let os_name = self
            .fs
            .read_to_string(Path::new("/etc/os-release"))
            .ok()
            .and_then(|c| parser::parse_os_release(&c))
            .unwrap_or_else(|| "Linux".to_string());

        let (load1, load5, load15) = self
            .read_proc("loadavg")
            .ok()
            .and_then(|c| parser::parse_loadavg(&c).ok())
            .unwrap_or((0.0, 0.0, 0.0));

        let uptime_secs = self
            .read_proc("uptime")
            .ok()
            .and_then(|c| parser::parse_uptime(&c).ok())
            .unwrap_or(0);

        SysInfo {
            hostname: read_trimmed("sys/kernel/hostname"),
            os_name,
            kernel: read_trimmed("sys/kernel/osrelease"),
            uptime_secs,
            load1,
            load5,
            load15,
            local_time: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
