//! Process sampler over `/proc/[pid]/` entries.

use std::path::Path;

use crate::model::{ProcessSample, ProcessStat};

use super::CollectError;
use super::parser::parse_pid_stat;
use super::traits::FileSystem;

/// Memory page size in bytes. Standard value for Linux on the architectures
/// this tool targets.
const PAGE_SIZE: u64 = 4096;

/// Samples the process table from `/proc/[pid]/` files.
pub struct ProcessSampler<F: FileSystem> {
    fs: F,
    proc_path: String,
}

impl<F: FileSystem> ProcessSampler<F> {
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Reads one process. Returns `None` when the process disappeared
    /// between the directory scan and the read.
    fn sample_process(&self, pid: u32) -> Option<ProcessStat> {
        let stat_path = format!("{}/{}/stat", self.proc_path, pid);
        let stat_content = self.fs.read_to_string(Path::new(&stat_path)).ok()?;
        let stat = parse_pid_stat(&stat_content).ok()?;

        let cmdline_path = format!("{}/{}/cmdline", self.proc_path, pid);
        let cmdline = self
            .fs
            .read_to_string(Path::new(&cmdline_path))
            .unwrap_or_default()
            .replace('\0', " ")
            .trim()
            .to_string();

        // kernel threads have an empty cmdline; show [comm] like ps does
        let command = if cmdline.is_empty() {
            format!("[{}]", stat.comm)
        } else {
            cmdline
        };

        Some(ProcessStat {
            pid: stat.pid,
            cpu_ticks: stat.cpu_ticks,
            rss_kb: stat.rss_pages * PAGE_SIZE / 1024,
            command,
        })
    }

    /// Samples every live process. Processes that disappear mid-scan are
    /// silently skipped.
    pub fn sample_all(&self) -> Result<ProcessSample, CollectError> {
        let entries = self.fs.read_dir(Path::new(&self.proc_path))?;

        let mut processes = Vec::new();
        for entry in entries {
            if let Some(name) = entry.file_name().and_then(|n| n.to_str())
                && let Ok(pid) = name.parse::<u32>()
                && let Some(stat) = self.sample_process(pid)
            {
                processes.push(stat);
            }
        }
        processes.sort_by_key(|p| p.pid);

        Ok(ProcessSample { processes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn samples_all_pid_directories() {
        let sampler = ProcessSampler::new(MockFs::typical_system(), "/proc");
        let sample = sampler.sample_all().unwrap();
        let pids: Vec<u32> = sample.processes.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 1000, 1001]);
    }

    #[test]
    fn cmdline_becomes_command() {
        let sampler = ProcessSampler::new(MockFs::typical_system(), "/proc");
        let sample = sampler.sample_all().unwrap();
        let nginx = sample.processes.iter().find(|p| p.pid == 1000).unwrap();
        assert_eq!(nginx.command, "nginx: worker process");
        assert_eq!(nginx.cpu_ticks, 1200);
        assert_eq!(nginx.rss_kb, 12800 * 4);
    }

    #[test]
    fn kernel_thread_uses_bracketed_comm() {
        let sampler = ProcessSampler::new(MockFs::typical_system(), "/proc");
        let sample = sampler.sample_all().unwrap();
        let kswapd = sample.processes.iter().find(|p| p.pid == 1001).unwrap();
        assert_eq!(kswapd.command, "[kswapd0]");
    }

    #[test]
    fn vanished_process_is_skipped() {
        let mut fs = MockFs::typical_system();
        fs.add_dir("/proc/9999"); // directory without a stat file
        let sampler = ProcessSampler::new(fs, "/proc");
        let sample = sampler.sample_all().unwrap();
        assert!(sample.processes.iter().all(|p| p.pid != 9999));
    }

    #[test]
    fn missing_proc_dir_is_error() {
        let sampler = ProcessSampler::new(MockFs::new(), "/proc");
        assert!(sampler.sample_all().is_err());
    }
}
