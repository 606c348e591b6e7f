//! Shared formatting helpers for the dashboard.
//!
//! Pure functions only, no styles and no layout. Byte quantities use
//! binary-prefix units (B, KB, MB, GB at 1024 steps) with one decimal place
//! above bytes.

const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;
const GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count: `"512 B"`, `"1.0 KB"`, `"2.3 GB"`.
pub fn format_bytes(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= GB {
        format!("{:.1} GB", b / GB)
    } else if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a bytes-per-second rate: `"1.0 KB/s"`, `"512 B/s"`.
pub fn format_bytes_rate(rate: f64) -> String {
    let rate = rate.max(0.0);
    if rate >= GB {
        format!("{:.1} GB/s", rate / GB)
    } else if rate >= MB {
        format!("{:.1} MB/s", rate / MB)
    } else if rate >= KB {
        format!("{:.1} KB/s", rate / KB)
    } else {
        format!("{:.0} B/s", rate)
    }
}

/// Format a kB quantity as human-readable bytes.
pub fn format_kb(kb: u64) -> String {
    format_bytes(kb.saturating_mul(1024))
}

/// Format an uptime in seconds: `"3d 4h 12m"`, `"4h 12m"`, `"12m 5s"`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, mins)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m {}s", mins, secs % 60)
    }
}

/// Truncate a string to `max_len` characters with a trailing ellipsis.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
