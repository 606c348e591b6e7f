//! Per-tick sample types collected from the `/proc` filesystem.
//!
//! A [`TickSample`] is an immutable snapshot of every metric family at one
//! instant. Samples carry raw cumulative counters only; rates and percentages
//! are derived later by [`crate::rates::RateEngine`]. Each sample is created
//! fresh on every tick and discarded after rendering.

/// Cumulative CPU time counters in jiffies (clock ticks).
///
/// Source: one `cpu`/`cpuN` line of `/proc/stat`, columns 1-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CpuTimes {
    /// Time spent in user mode.
    pub user: u64,
    /// Time spent in user mode with low priority (nice).
    pub nice: u64,
    /// Time spent in system/kernel mode.
    pub system: u64,
    /// Time spent idle.
    pub idle: u64,
    /// Time waiting for I/O to complete.
    pub iowait: u64,
    /// Time servicing hardware interrupts.
    pub irq: u64,
    /// Time servicing software interrupts.
    pub softirq: u64,
    /// Time stolen by the hypervisor for other VMs.
    pub steal: u64,
}

impl CpuTimes {
    /// Sum of all eight counters.
    pub fn total(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Idle time including I/O wait.
    pub fn idle_total(&self) -> u64 {
        self.idle + self.iowait
    }
}

/// CPU statistics from `/proc/stat`: the aggregate line plus one row per
/// logical core.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CpuSample {
    /// Aggregate counters (the `cpu` line without a core id).
    pub total: CpuTimes,
    /// Per-core counters, in `/proc/stat` order.
    pub cores: Vec<(u32, CpuTimes)>,
}

/// Memory statistics from `/proc/meminfo`. All values in kB.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySample {
    pub total: u64,
    pub free: u64,
    /// `MemAvailable` - better estimate for "usable" than free alone.
    pub available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

/// Usage of one retained mounted filesystem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountUsage {
    /// Mount point (e.g. `/`, `/var`).
    pub mount_point: String,
    /// Filesystem type (ext4, xfs, ...).
    pub fs_type: String,
    /// Used space in kB.
    pub used_kb: u64,
    /// Total size in kB.
    pub size_kb: u64,
    /// Integer used-percent, 0-100.
    pub used_percent: u8,
}

/// Per-mount disk usage, pseudo-filesystems already excluded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiskSample {
    pub mounts: Vec<MountUsage>,
}

/// Cumulative traffic counters for one network interface.
///
/// Source: one line of `/proc/net/dev`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceCounters {
    pub name: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

/// Per-interface counters, loopback already excluded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkSample {
    pub interfaces: Vec<InterfaceCounters>,
}

/// Raw per-process counters from `/proc/[pid]/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessStat {
    pub pid: u32,
    /// Cumulative CPU time (utime + stime) in jiffies.
    pub cpu_ticks: u64,
    /// Resident set size in kB.
    pub rss_kb: u64,
    /// Command line, or `[comm]` when the cmdline is empty (kernel threads).
    pub command: String,
}

/// The full process table at one instant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessSample {
    pub processes: Vec<ProcessStat>,
}

/// Host identity for the dashboard header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SysInfo {
    pub hostname: String,
    /// Pretty OS name from `/etc/os-release`.
    pub os_name: String,
    /// Kernel release from `/proc/sys/kernel/osrelease`.
    pub kernel: String,
    pub uptime_secs: u64,
    pub load1: f32,
    pub load5: f32,
    pub load15: f32,
    /// Wall-clock time formatted at sample time.
    pub local_time: String,
}

/// One complete sampling pass over every metric family.
///
/// Subsystems that could not be read this tick carry their empty default;
/// the dashboard keeps running on partial data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSample {
    /// Seconds since the Unix epoch at collection time.
    pub timestamp: i64,
    pub cpu: CpuSample,
    pub memory: MemorySample,
    pub disk: DiskSample,
    pub network: NetworkSample,
    pub processes: ProcessSample,
    pub identity: SysInfo,
}
