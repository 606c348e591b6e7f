//! Per-tick derived metrics.
//!
//! [`derive`] turns a raw [`TickSample`] plus the [`RateEngine`] state into
//! the percentages, rates and top-N tables the renderer consumes. Created
//! fresh each tick and discarded after rendering.

use crate::model::TickSample;
use crate::rates::{RateEngine, mem_used_percent, swap_used_percent};

/// How many processes each top-N table shows.
pub const TOP_PROCESSES: usize = 5;

/// One gauge row of the memory section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsageGauge {
    pub percent: u8,
    pub used_kb: u64,
    pub total_kb: u64,
}

/// Derived rates for the active network interface.
#[derive(Clone, Debug, PartialEq)]
pub struct NetRates {
    pub interface: String,
    /// Bytes per second, never negative.
    pub rx_rate: f64,
    pub tx_rate: f64,
}

/// One row of a top-processes table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRow {
    pub pid: u32,
    pub cpu_percent: u8,
    pub mem_percent: u8,
    pub command: String,
}

/// One row of the disk section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskRow {
    pub mount_point: String,
    pub percent: u8,
    pub used_kb: u64,
    pub size_kb: u64,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedMetrics {
    /// Aggregate CPU busy percent.
    pub cpu_total: u8,
    /// Per-core busy percents, in core order.
    pub cpu_cores: Vec<(u32, u8)>,
    pub memory: UsageGauge,
    /// `None` when the host has no swap configured.
    pub swap: Option<UsageGauge>,
    pub disks: Vec<DiskRow>,
    /// `None` when no non-loopback interface exists.
    pub network: Option<NetRates>,
    pub top_by_cpu: Vec<ProcessRow>,
    pub top_by_mem: Vec<ProcessRow>,
}

/// Derives one tick of metrics. Mutates `engine` to record this sample as
/// the next tick's baseline.
pub fn derive(
    sample: &TickSample,
    engine: &mut RateEngine,
    elapsed_secs: f64,
    top_n: usize,
) -> DerivedMetrics {
    let cpu_total = engine.cpu_busy_percent("cpu", sample.cpu.total);
    let cpu_cores = sample
        .cpu
        .cores
        .iter()
        .map(|(id, times)| (*id, engine.cpu_busy_percent(&format!("cpu{}", id), *times)))
        .collect();

    let mem = &sample.memory;
    let memory = UsageGauge {
        percent: mem_used_percent(mem.total, mem.available),
        used_kb: mem.total.saturating_sub(mem.available),
        total_kb: mem.total,
    };
    let swap = (mem.swap_total > 0).then(|| UsageGauge {
        percent: swap_used_percent(mem.swap_total, mem.swap_free),
        used_kb: mem.swap_total.saturating_sub(mem.swap_free),
        total_kb: mem.swap_total,
    });

    let disks = sample
        .disk
        .mounts
        .iter()
        .map(|m| DiskRow {
            mount_point: m.mount_point.clone(),
            percent: m.used_percent,
            used_kb: m.used_kb,
            size_kb: m.size_kb,
        })
        .collect();

    // The dashboard shows a single interface: the one with the most
    // cumulative traffic this tick.
    let network = sample
        .network
        .interfaces
        .iter()
        .max_by_key(|i| i.rx_bytes + i.tx_bytes)
        .map(|iface| NetRates {
            interface: iface.name.clone(),
            rx_rate: engine.byte_rate(&format!("{}.rx", iface.name), iface.rx_bytes, elapsed_secs),
            tx_rate: engine.byte_rate(&format!("{}.tx", iface.name), iface.tx_bytes, elapsed_secs),
        });

    let cpu_pcts = engine.process_cpu_percents(&sample.processes.processes, sample.cpu.total.total());
    let mut rows: Vec<ProcessRow> = sample
        .processes
        .processes
        .iter()
        .map(|p| ProcessRow {
            pid: p.pid,
            cpu_percent: cpu_pcts.get(&p.pid).copied().unwrap_or(0),
            mem_percent: if mem.total > 0 {
                ((p.rss_kb * 100 / mem.total).min(100)) as u8
            } else {
                0
            },
            command: p.command.clone(),
        })
        .collect();

    // PID tiebreak keeps the tables stable between identical samples
    rows.sort_by(|a, b| b.cpu_percent.cmp(&a.cpu_percent).then(a.pid.cmp(&b.pid)));
    let top_by_cpu = rows.iter().take(top_n).cloned().collect();
    rows.sort_by(|a, b| b.mem_percent.cmp(&a.mem_percent).then(a.pid.cmp(&b.pid)));
    let top_by_mem = rows.into_iter().take(top_n).collect();

    DerivedMetrics {
        cpu_total,
        cpu_cores,
        memory,
        swap,
        disks,
        network,
        top_by_cpu,
        top_by_mem,
    }
}
