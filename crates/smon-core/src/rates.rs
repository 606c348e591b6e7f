//! Rate computation over consecutive samples.
//!
//! This module is the single source of truth for turning cumulative kernel
//! counters into percentages and byte rates. All previous-sample state lives
//! in [`RateEngine`], keyed by entity name; nothing else in the crate holds
//! cross-tick state.
//!
//! Invariants, uniformly enforced:
//! - the first observation of any key yields 0 and records a baseline
//! - a counter regression (reset/wrap) yields 0 for that tick, never a
//!   negative value
//! - every division is guarded against a zero denominator

use std::collections::HashMap;

use crate::model::{CpuTimes, ProcessStat};

/// Compute u64 delta, returning `None` on counter regression.
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    (curr >= prev).then(|| curr - prev)
}

/// Memory used-percent: used = total - available, integer division.
/// Returns 0 when total is 0.
pub fn mem_used_percent(total_kb: u64, available_kb: u64) -> u8 {
    if total_kb == 0 {
        return 0;
    }
    let used = total_kb.saturating_sub(available_kb);
    (used * 100 / total_kb).min(100) as u8
}

/// Swap used-percent: used = total - free, integer division.
/// Returns 0 when total is 0.
pub fn swap_used_percent(total_kb: u64, free_kb: u64) -> u8 {
    if total_kb == 0 {
        return 0;
    }
    let used = total_kb.saturating_sub(free_kb);
    (used * 100 / total_kb).min(100) as u8
}

/// Holds the previous absolute sample for every delta-based metric.
///
/// Owned by the render loop for the process lifetime; updated exactly once
/// per tick. Ticks are strictly sequential, so no synchronization is needed.
#[derive(Debug, Default)]
pub struct RateEngine {
    prev_cpu: HashMap<String, CpuTimes>,
    prev_bytes: HashMap<String, u64>,
    prev_proc_ticks: HashMap<u32, u64>,
    prev_total_ticks: Option<u64>,
}

impl RateEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Busy percentage for one CPU entity (aggregate or a single core).
    ///
    /// busy% = (dtotal - didle) * 100 / dtotal with idle including iowait,
    /// clamped to [0, 100]. Returns 0 on the warm-up tick, when the counters
    /// did not advance, and on any counter regression.
    pub fn cpu_busy_percent(&mut self, key: &str, curr: CpuTimes) -> u8 {
        let Some(prev) = self.prev_cpu.insert(key.to_string(), curr) else {
            return 0;
        };
        let Some(d_total) = du64(curr.total(), prev.total()) else {
            return 0;
        };
        if d_total == 0 {
            return 0;
        }
        let Some(d_idle) = du64(curr.idle_total(), prev.idle_total()) else {
            return 0;
        };
        let busy = d_total.saturating_sub(d_idle);
        (busy * 100 / d_total).min(100) as u8
    }

    /// Byte rate for one counter key (e.g. `"eth0.rx"`).
    ///
    /// Returns 0.0 on the warm-up tick, on regression, and when
    /// `elapsed_secs` is not positive. Never negative.
    pub fn byte_rate(&mut self, key: &str, bytes: u64, elapsed_secs: f64) -> f64 {
        let Some(prev) = self.prev_bytes.insert(key.to_string(), bytes) else {
            return 0.0;
        };
        if elapsed_secs <= 0.0 {
            return 0.0;
        }
        match du64(bytes, prev) {
            Some(delta) => delta as f64 / elapsed_secs,
            None => 0.0,
        }
    }

    /// Per-process CPU percentages against the aggregate jiffy delta.
    ///
    /// The previous per-PID table is fully replaced each tick, so PIDs that
    /// exited are evicted and a reused PID with a smaller counter reads as a
    /// regression (0 for one tick).
    pub fn process_cpu_percents(
        &mut self,
        procs: &[ProcessStat],
        total_ticks: u64,
    ) -> HashMap<u32, u8> {
        let d_total = match self.prev_total_ticks.replace(total_ticks) {
            Some(prev) => du64(total_ticks, prev).unwrap_or(0),
            None => 0,
        };

        let mut prev = std::mem::take(&mut self.prev_proc_ticks);
        let mut out = HashMap::with_capacity(procs.len());
        for p in procs {
            let pct = match prev.remove(&p.pid) {
                Some(prev_ticks) if d_total > 0 => du64(p.cpu_ticks, prev_ticks)
                    .map(|d| (d * 100 / d_total).min(100) as u8)
                    .unwrap_or(0),
                _ => 0,
            };
            out.insert(p.pid, pct);
            self.prev_proc_ticks.insert(p.pid, p.cpu_ticks);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(user: u64, idle: u64, iowait: u64) -> CpuTimes {
        CpuTimes {
            user,
            idle,
            iowait,
            ..Default::default()
        }
    }

    // ===== delta helper =====

    #[test]
    fn du64_regression_yields_none() {
        assert_eq!(du64(10, 5), Some(5));
        assert_eq!(du64(5, 5), Some(0));
        assert_eq!(du64(4, 5), None);
    }

    // ===== CPU busy% =====

    #[test]
    fn cpu_first_sample_is_baseline() {
        let mut engine = RateEngine::new();
        assert_eq!(engine.cpu_busy_percent("cpu", times(500, 400, 100)), 0);
    }

    #[test]
    fn cpu_busy_percent_scenario() {
        // total=1000 idle_total=900 -> total=2000 idle_total=1000
        // busy% = (1000 - 100) * 100 / 1000 = 90
        let mut engine = RateEngine::new();
        engine.cpu_busy_percent("cpu", times(100, 850, 50));
        assert_eq!(engine.cpu_busy_percent("cpu", times(1000, 950, 50)), 90);
    }

    #[test]
    fn cpu_all_idle_growth_is_zero() {
        let mut engine = RateEngine::new();
        engine.cpu_busy_percent("cpu", times(100, 900, 0));
        // idle grew exactly as fast as total
        assert_eq!(engine.cpu_busy_percent("cpu", times(100, 1900, 0)), 0);
    }

    #[test]
    fn cpu_no_idle_growth_is_full() {
        let mut engine = RateEngine::new();
        engine.cpu_busy_percent("cpu", times(100, 900, 0));
        assert_eq!(engine.cpu_busy_percent("cpu", times(1100, 900, 0)), 100);
    }

    #[test]
    fn cpu_stalled_counter_is_zero() {
        let mut engine = RateEngine::new();
        let t = times(100, 900, 0);
        engine.cpu_busy_percent("cpu", t);
        assert_eq!(engine.cpu_busy_percent("cpu", t), 0);
    }

    #[test]
    fn cpu_counter_regression_is_zero_then_recovers() {
        let mut engine = RateEngine::new();
        engine.cpu_busy_percent("cpu", times(1000, 9000, 0));
        // reboot-style reset: counters shrink
        assert_eq!(engine.cpu_busy_percent("cpu", times(10, 90, 0)), 0);
        // next delta computes against the post-reset baseline
        assert_eq!(engine.cpu_busy_percent("cpu", times(110, 90, 0)), 100);
    }

    #[test]
    fn cpu_keys_are_independent() {
        let mut engine = RateEngine::new();
        engine.cpu_busy_percent("cpu0", times(100, 900, 0));
        // cpu1 never seen before: warm-up regardless of cpu0 state
        assert_eq!(engine.cpu_busy_percent("cpu1", times(500, 500, 0)), 0);
    }

    // ===== byte rates =====

    #[test]
    fn rate_first_observation_is_zero() {
        let mut engine = RateEngine::new();
        assert_eq!(engine.byte_rate("eth0.rx", 123_456_789, 2.0), 0.0);
    }

    #[test]
    fn rate_is_delta_over_elapsed() {
        // rx goes 1000 -> 3048 over 2s: 1024 B/s
        let mut engine = RateEngine::new();
        engine.byte_rate("eth0.rx", 1000, 2.0);
        assert_eq!(engine.byte_rate("eth0.rx", 3048, 2.0), 1024.0);
    }

    #[test]
    fn rate_discontinuity_is_zero_not_negative() {
        let mut engine = RateEngine::new();
        engine.byte_rate("eth0.rx", 1000, 2.0);
        // interface reset: counter shrinks
        assert_eq!(engine.byte_rate("eth0.rx", 500, 2.0), 0.0);
        // and the reset value became the new baseline
        assert_eq!(engine.byte_rate("eth0.rx", 2548, 2.0), 1024.0);
    }

    #[test]
    fn rate_zero_elapsed_is_zero() {
        let mut engine = RateEngine::new();
        engine.byte_rate("eth0.tx", 1000, 2.0);
        assert_eq!(engine.byte_rate("eth0.tx", 9000, 0.0), 0.0);
    }

    // ===== memory/swap percent =====

    #[test]
    fn mem_percent_is_total_minus_available() {
        assert_eq!(mem_used_percent(8_388_608, 4_194_304), 50);
        assert_eq!(mem_used_percent(1000, 1000), 0);
        assert_eq!(mem_used_percent(1000, 0), 100);
    }

    #[test]
    fn mem_percent_guards_zero_total() {
        assert_eq!(mem_used_percent(0, 0), 0);
        assert_eq!(swap_used_percent(0, 0), 0);
    }

    #[test]
    fn swap_percent_is_total_minus_free() {
        assert_eq!(swap_used_percent(4_096_000, 3_072_000), 25);
    }

    // ===== process CPU% =====

    fn proc_stat(pid: u32, cpu_ticks: u64) -> ProcessStat {
        ProcessStat {
            pid,
            cpu_ticks,
            rss_kb: 0,
            command: String::new(),
        }
    }

    #[test]
    fn process_first_tick_is_all_zero() {
        let mut engine = RateEngine::new();
        let pcts = engine.process_cpu_percents(&[proc_stat(1, 500), proc_stat(2, 900)], 10_000);
        assert_eq!(pcts[&1], 0);
        assert_eq!(pcts[&2], 0);
    }

    #[test]
    fn process_percent_from_deltas() {
        let mut engine = RateEngine::new();
        engine.process_cpu_percents(&[proc_stat(1, 100)], 10_000);
        // process used 200 of 1000 jiffies -> 20%
        let pcts = engine.process_cpu_percents(&[proc_stat(1, 300)], 11_000);
        assert_eq!(pcts[&1], 20);
    }

    #[test]
    fn process_dead_pid_is_evicted() {
        let mut engine = RateEngine::new();
        engine.process_cpu_percents(&[proc_stat(1, 100), proc_stat(2, 100)], 10_000);
        engine.process_cpu_percents(&[proc_stat(1, 200)], 11_000);
        // pid 2 returns with a smaller counter (PID reuse): warm-up again
        let pcts = engine.process_cpu_percents(&[proc_stat(1, 300), proc_stat(2, 50)], 12_000);
        assert_eq!(pcts[&2], 0);
    }
}
