//! Parsers for `/proc` filesystem files.
//!
//! Pure functions over file content, designed to be testable with string
//! inputs. All I/O stays in the samplers.

use crate::model::{CpuSample, CpuTimes, InterfaceCounters, MemorySample};

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Filesystem types never shown in the disk section.
pub const EXCLUDED_FS_TYPES: &[&str] = &["tmpfs", "devtmpfs", "overlay", "none"];

/// Mount-point prefixes never shown in the disk section.
pub const EXCLUDED_MOUNT_PREFIXES: &[&str] = &["/boot", "/snap", "/dev/shm", "/run", "/sys"];

/// Returns true when a mount must be excluded from the disk section.
pub fn is_excluded_mount(fs_type: &str, mount_point: &str) -> bool {
    EXCLUDED_FS_TYPES.contains(&fs_type)
        || EXCLUDED_MOUNT_PREFIXES
            .iter()
            .any(|p| mount_point == *p || mount_point.starts_with(&format!("{}/", p)))
}

/// Parses the cpu lines of `/proc/stat` into a [`CpuSample`].
///
/// The `cpu` line (no id) becomes the aggregate; `cpuN` lines become cores.
pub fn parse_cpu_stat(content: &str) -> Result<CpuSample, ParseError> {
    let mut sample = CpuSample::default();
    let mut saw_aggregate = false;

    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            continue;
        };
        if !first.starts_with("cpu") {
            continue;
        }

        let get_val = |idx: usize| -> u64 { parts.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };
        let times = CpuTimes {
            user: get_val(1),
            nice: get_val(2),
            system: get_val(3),
            idle: get_val(4),
            iowait: get_val(5),
            irq: get_val(6),
            softirq: get_val(7),
            steal: get_val(8),
        };

        if *first == "cpu" {
            sample.total = times;
            saw_aggregate = true;
        } else if let Some(id) = first.strip_prefix("cpu").and_then(|s| s.parse().ok()) {
            sample.cores.push((id, times));
        }
    }

    if !saw_aggregate {
        return Err(ParseError::new("no aggregate cpu line in stat"));
    }
    Ok(sample)
}

/// Parses `/proc/meminfo` content. All values are kB.
pub fn parse_meminfo(content: &str) -> Result<MemorySample, ParseError> {
    let mut sample = MemorySample::default();

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            sample.total = parse_kb(line);
        } else if line.starts_with("MemFree:") {
            sample.free = parse_kb(line);
        } else if line.starts_with("MemAvailable:") {
            sample.available = parse_kb(line);
        } else if line.starts_with("Buffers:") {
            sample.buffers = parse_kb(line);
        } else if line.starts_with("Cached:") {
            sample.cached = parse_kb(line);
        } else if line.starts_with("SwapTotal:") {
            sample.swap_total = parse_kb(line);
        } else if line.starts_with("SwapFree:") {
            sample.swap_free = parse_kb(line);
        }
    }

    if sample.total == 0 {
        return Err(ParseError::new("no MemTotal in meminfo"));
    }
    Ok(sample)
}

/// Parses `/proc/net/dev` content into per-interface counters.
///
/// Header lines are skipped; the loopback interface is excluded here so no
/// caller ever sees it.
pub fn parse_net_dev(content: &str) -> Result<Vec<InterfaceCounters>, ParseError> {
    let mut interfaces = Vec::new();

    for line in content.lines() {
        if line.contains('|') || line.trim().is_empty() {
            continue;
        }
        let Some((name, values)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name == "lo" {
            continue;
        }
        let values: Vec<&str> = values.split_whitespace().collect();
        if values.len() < 16 {
            continue;
        }
        let get_val = |idx: usize| -> u64 { values.get(idx).and_then(|s| s.parse().ok()).unwrap_or(0) };
        interfaces.push(InterfaceCounters {
            name: name.to_string(),
            rx_bytes: get_val(0),
            tx_bytes: get_val(8),
        });
    }

    Ok(interfaces)
}

/// One row of `/proc/mounts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
}

/// Parses `/proc/mounts` content, applying the pseudo-filesystem denylist.
///
/// Only mounts backed by a device path (`/dev/...`) survive in addition to
/// the type/prefix filters; malformed lines are skipped.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    let mut mounts = Vec::new();

    for line in content.lines() {
        let mut parts = line.split_whitespace();
        let (Some(device), Some(mount_point), Some(fs_type)) =
            (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };
        if !device.starts_with("/dev/") {
            continue;
        }
        if is_excluded_mount(fs_type, mount_point) {
            continue;
        }
        mounts.push(MountEntry {
            device: device.to_string(),
            // kernel escapes spaces in mount points as \040
            mount_point: mount_point.replace("\\040", " "),
            fs_type: fs_type.to_string(),
        });
    }

    mounts
}

/// Parses `/proc/loadavg` content into (load1, load5, load15).
pub fn parse_loadavg(content: &str) -> Result<(f32, f32, f32), ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(ParseError::new("invalid loadavg format"));
    }
    let load1 = parts[0]
        .parse()
        .map_err(|_| ParseError::new("invalid load1"))?;
    let load5 = parts[1]
        .parse()
        .map_err(|_| ParseError::new("invalid load5"))?;
    let load15 = parts[2]
        .parse()
        .map_err(|_| ParseError::new("invalid load15"))?;
    Ok((load1, load5, load15))
}

/// Parses `/proc/uptime` content into whole seconds.
pub fn parse_uptime(content: &str) -> Result<u64, ParseError> {
    content
        .split_whitespace()
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .map(|secs| secs as u64)
        .ok_or_else(|| ParseError::new("invalid uptime format"))
}

/// Fields needed from `/proc/[pid]/stat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PidStat {
    pub pid: u32,
    pub comm: String,
    /// utime + stime, jiffies.
    pub cpu_ticks: u64,
    /// Resident set size in pages.
    pub rss_pages: u64,
}

/// Parses `/proc/[pid]/stat` content.
///
/// The format is tricky because the comm field can contain spaces and
/// parentheses; everything before the last `)` belongs to pid/comm.
pub fn parse_pid_stat(content: &str) -> Result<PidStat, ParseError> {
    let content = content.trim();

    let open_paren = content
        .find('(')
        .ok_or_else(|| ParseError::new("missing '(' in stat"))?;
    let close_paren = content
        .rfind(')')
        .ok_or_else(|| ParseError::new("missing ')' in stat"))?;
    if close_paren <= open_paren {
        return Err(ParseError::new("invalid parentheses in stat"));
    }

    let pid: u32 = content[..open_paren]
        .trim()
        .parse()
        .map_err(|_| ParseError::new("invalid pid"))?;
    let comm = content[open_paren + 1..close_paren].to_string();

    // Fields after ')': state is index 0, utime 11, stime 12, rss 21.
    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();
    if fields.len() < 22 {
        return Err(ParseError::new(format!(
            "not enough fields in stat: expected 22+, got {}",
            fields.len()
        )));
    }

    let parse_u64 = |idx: usize, name: &str| -> Result<u64, ParseError> {
        fields[idx]
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {}", name)))
    };

    let utime = parse_u64(11, "utime")?;
    let stime = parse_u64(12, "stime")?;
    let rss: i64 = fields[21]
        .parse()
        .map_err(|_| ParseError::new("invalid rss"))?;

    Ok(PidStat {
        pid,
        comm,
        cpu_ticks: utime + stime,
        rss_pages: rss.max(0) as u64,
    })
}

/// Extracts `PRETTY_NAME` from `/etc/os-release` content.
pub fn parse_os_release(content: &str) -> Option<String> {
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
            return Some(value.trim().trim_matches('"').to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cpu_stat_aggregate_and_cores() {
        let content = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
ctxt 500000
btime 1700000000
";
        let sample = parse_cpu_stat(content).unwrap();
        assert_eq!(sample.total.user, 10000);
        assert_eq!(sample.total.idle, 80000);
        assert_eq!(sample.cores.len(), 2);
        assert_eq!(sample.cores[0].0, 0);
        assert_eq!(sample.cores[1].0, 1);
        assert_eq!(sample.cores[1].1.system, 750);
    }

    #[test]
    fn parse_cpu_stat_requires_aggregate() {
        assert!(parse_cpu_stat("ctxt 12345\n").is_err());
    }

    #[test]
    fn parse_meminfo_fields() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
";
        let mem = parse_meminfo(content).unwrap();
        assert_eq!(mem.total, 16384000);
        assert_eq!(mem.available, 12000000);
        assert_eq!(mem.buffers, 512000);
        assert_eq!(mem.swap_total, 4096000);
        assert_eq!(mem.swap_free, 4096000);
    }

    #[test]
    fn parse_meminfo_rejects_empty() {
        assert!(parse_meminfo("").is_err());
    }

    #[test]
    fn parse_net_dev_excludes_loopback() {
        let content = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0
  eth0: 9876543     5678    1    2    0     0          0        10 87654321     4321    3    4    0     0       0          0
";
        let devices = parse_net_dev(content).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, "eth0");
        assert_eq!(devices[0].rx_bytes, 9876543);
        assert_eq!(devices[0].tx_bytes, 87654321);
    }

    #[test]
    fn parse_mounts_applies_denylist() {
        let content = "\
/dev/vda1 / ext4 rw,relatime 0 0
/dev/vda2 /boot ext4 rw,relatime 0 0
tmpfs /tmp tmpfs rw,nosuid 0 0
/dev/sdb1 /data xfs rw,relatime 0 0
overlay / overlay rw,lowerdir=/x 0 0
proc /proc proc rw,nosuid 0 0
/dev/loop3 /snap/core/1 squashfs ro 0 0
";
        let mounts = parse_mounts(content);
        let points: Vec<&str> = mounts.iter().map(|m| m.mount_point.as_str()).collect();
        assert_eq!(points, vec!["/", "/data"]);
        assert_eq!(mounts[1].fs_type, "xfs");
    }

    #[test]
    fn excluded_mount_prefix_is_not_substring_match() {
        // /boota is not under /boot
        assert!(is_excluded_mount("ext4", "/boot"));
        assert!(is_excluded_mount("ext4", "/boot/efi"));
        assert!(!is_excluded_mount("ext4", "/boota"));
        assert!(is_excluded_mount("tmpfs", "/anything"));
        assert!(is_excluded_mount("overlay", "/"));
    }

    #[test]
    fn parse_loadavg_triple() {
        let (l1, l5, l15) = parse_loadavg("0.15 0.10 0.05 1/150 1234\n").unwrap();
        assert!((l1 - 0.15).abs() < 0.001);
        assert!((l5 - 0.10).abs() < 0.001);
        assert!((l15 - 0.05).abs() < 0.001);
    }

    #[test]
    fn parse_uptime_whole_seconds() {
        assert_eq!(parse_uptime("12345.67 54321.00\n").unwrap(), 12345);
        assert!(parse_uptime("").is_err());
    }

    #[test]
    fn parse_pid_stat_basic() {
        let content = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 0 10 0 100 50 0 0 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0";
        let stat = parse_pid_stat(content).unwrap();
        assert_eq!(stat.pid, 1234);
        assert_eq!(stat.comm, "bash");
        assert_eq!(stat.cpu_ticks, 150);
        assert_eq!(stat.rss_pages, 2000);
    }

    #[test]
    fn parse_pid_stat_with_spaces_and_parens_in_comm() {
        let content = "5000 (Web (Content)) S 4999 5000 4999 0 -1 4194304 100000 0 500 0 5000 1000 0 0 20 0 20 0 500000 2000000000 50000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0";
        let stat = parse_pid_stat(content).unwrap();
        assert_eq!(stat.pid, 5000);
        assert_eq!(stat.comm, "Web (Content)");
        assert_eq!(stat.cpu_ticks, 6000);
    }

    #[test]
    fn parse_pid_stat_rejects_short_content() {
        assert!(parse_pid_stat("17 (x) S 1 2").is_err());
    }

    #[test]
    fn parse_os_release_pretty_name() {
        let content = "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n";
        assert_eq!(
            parse_os_release(content).as_deref(),
            Some("Debian GNU/Linux 12 (bookworm)")
        );
        assert_eq!(parse_os_release("NAME=x\n"), None);
    }
}
