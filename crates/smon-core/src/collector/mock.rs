//! In-memory mock filesystem for testing samplers without real `/proc`.
//!
//! `MockFs` simulates a filesystem in memory, allowing tests (and the demo
//! fallback on non-Linux hosts) to run without procfs access.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use super::traits::{FileSystem, FsUsage};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    usages: HashMap<PathBuf, FsUsage>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content. Parent directories are created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
        self.files.insert(path, content.into());
    }

    /// Adds an empty directory.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.directories.insert(path.clone());
        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }
    }

    /// Registers statvfs-style usage for a mount point.
    pub fn set_usage(&mut self, path: impl AsRef<Path>, total_bytes: u64, avail_bytes: u64) {
        self.usages.insert(
            path.as_ref().to_path_buf(),
            FsUsage {
                total_bytes,
                avail_bytes,
            },
        );
    }

    /// Adds a process with its `/proc/[pid]/` files.
    pub fn add_process(&mut self, pid: u32, stat: &str, cmdline: &str) {
        let base = PathBuf::from(format!("/proc/{}", pid));
        self.add_dir(&base);
        self.add_file(base.join("stat"), stat);
        self.add_file(base.join("cmdline"), cmdline);
    }

    /// A small but complete host: 2 cores, 16 GB RAM, swap, one disk, one
    /// active interface, three processes.
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/proc/stat",
            "cpu  10000 500 3000 80000 1000 200 100 0 0 0\n\
             cpu0 2500 125 750 20000 250 50 25 0 0 0\n\
             cpu1 2500 125 750 20000 250 50 25 0 0 0\n\
             ctxt 500000\n\
             btime 1700000000\n",
        );
        fs.add_file(
            "/proc/meminfo",
            "MemTotal:       16384000 kB\n\
             MemFree:         8192000 kB\n\
             MemAvailable:   12000000 kB\n\
             Buffers:          512000 kB\n\
             Cached:          2048000 kB\n\
             SwapTotal:       4096000 kB\n\
             SwapFree:        3072000 kB\n",
        );
        fs.add_file(
            "/proc/net/dev",
            "Inter-|   Receive                                                |  Transmit\n\
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed\n\
    lo: 1234567     1234    0    0    0     0          0         0  1234567     1234    0    0    0     0       0          0\n\
  eth0: 9876543     5678    0    0    0     0          0         0 87654321     4321    0    0    0     0       0          0\n",
        );
        fs.add_file(
            "/proc/mounts",
            "/dev/vda1 / ext4 rw,relatime 0 0\n\
             /dev/vda2 /boot ext4 rw,relatime 0 0\n\
             tmpfs /tmp tmpfs rw,nosuid 0 0\n\
             proc /proc proc rw,nosuid 0 0\n",
        );
        fs.set_usage("/", 42_949_672_960, 21_474_836_480); // 40 GB, half free
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file("/proc/uptime", "86462.15 170000.00\n");
        fs.add_file("/proc/sys/kernel/hostname", "demo-host\n");
        fs.add_file("/proc/sys/kernel/osrelease", "6.1.0-18-amd64\n");
        fs.add_file(
            "/etc/os-release",
            "NAME=\"Debian GNU/Linux\"\nPRETTY_NAME=\"Debian GNU/Linux 12 (bookworm)\"\n",
        );

        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 5000 0 10 0 120 80 0 0 20 0 1 0 1 25000000 2500 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0",
            "/sbin/init\0",
        );
        fs.add_process(
            1000,
            "1000 (nginx) S 1 1000 1000 0 -1 4194304 100000 0 500 0 900 300 0 0 20 0 4 0 100000 200000000 12800 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0",
            "nginx: worker process\0",
        );
        fs.add_process(
            1001,
            "1001 (kswapd0) S 2 0 0 0 -1 2129984 0 0 0 0 30 60 0 0 20 0 1 0 50 0 0 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0",
            "",
        );

        fs
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory not found: {:?}", path),
            ));
        }

        let mut entries = HashSet::new();
        for file_path in self.files.keys() {
            if file_path.parent().is_some_and(|parent| parent == path) {
                entries.insert(file_path.clone());
            }
        }
        for dir_path in &self.directories {
            if dir_path.parent().is_some_and(|parent| parent == path) && dir_path != path {
                entries.insert(dir_path.clone());
            }
        }
        Ok(entries.into_iter().collect())
    }

    fn usage(&self, path: &Path) -> io::Result<FsUsage> {
        self.usages.get(path).copied().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no usage registered for {:?}", path),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parents() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");
        assert!(fs.exists(Path::new("/proc/meminfo")));
        assert!(fs.exists(Path::new("/proc")));
    }

    #[test]
    fn read_dir_lists_direct_children() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/1/stat", "a");
        fs.add_file("/proc/1/cmdline", "b");
        fs.add_file("/proc/2/stat", "c");

        let proc_entries = fs.read_dir(Path::new("/proc")).unwrap();
        assert_eq!(proc_entries.len(), 2);
        let pid1_entries = fs.read_dir(Path::new("/proc/1")).unwrap();
        assert_eq!(pid1_entries.len(), 2);
    }

    #[test]
    fn usage_lookup() {
        let mut fs = MockFs::new();
        fs.set_usage("/", 1000, 400);
        let usage = fs.usage(Path::new("/")).unwrap();
        assert_eq!(usage.total_bytes, 1000);
        assert_eq!(usage.avail_bytes, 400);
        assert!(fs.usage(Path::new("/data")).is_err());
    }

    #[test]
    fn missing_file_is_not_found() {
        let fs = MockFs::new();
        let err = fs.read_to_string(Path::new("/nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
