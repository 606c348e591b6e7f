//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the samplers read from the real `/proc`
//! filesystem on Linux or from an in-memory mock in tests and on platforms
//! without procfs.

use std::io;
use std::path::{Path, PathBuf};

/// Space usage of one mounted filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FsUsage {
    pub total_bytes: u64,
    pub avail_bytes: u64,
}

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Reports space usage of the filesystem mounted at `path`.
    fn usage(&self, path: &Path) -> io::Result<FsUsage>;
}

/// Real filesystem implementation that delegates to `std::fs` and `statvfs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }

    #[cfg(target_os = "linux")]
    fn usage(&self, path: &Path) -> io::Result<FsUsage> {
        use std::os::unix::ffi::OsStrExt;

        let c_path = std::ffi::CString::new(path.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains NUL"))?;
        // SAFETY: c_path is a valid NUL-terminated string and stats is a
        // properly sized statvfs buffer owned by this stack frame.
        let mut stats: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stats) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        let frsize = if stats.f_frsize > 0 {
            stats.f_frsize
        } else {
            stats.f_bsize
        };
        Ok(FsUsage {
            total_bytes: (stats.f_blocks as u64).saturating_mul(frsize as u64),
            avail_bytes: (stats.f_bavail as u64).saturating_mul(frsize as u64),
        })
    }

    #[cfg(not(target_os = "linux"))]
    fn usage(&self, _path: &Path) -> io::Result<FsUsage> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "statvfs is only available on Linux",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn real_fs_read_to_string() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cpu  1 2 3 4").unwrap();
        let fs = RealFs::new();
        let content = fs.read_to_string(file.path()).unwrap();
        assert!(content.starts_with("cpu "));
    }

    #[test]
    fn real_fs_exists() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let fs = RealFs::new();
        assert!(fs.exists(file.path()));
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn real_fs_read_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a"), "x").unwrap();
        std::fs::write(dir.path().join("b"), "y").unwrap();
        let fs = RealFs::new();
        let entries = fs.read_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn real_fs_usage_on_root() {
        let fs = RealFs::new();
        let usage = fs.usage(Path::new("/")).unwrap();
        assert!(usage.total_bytes > 0);
        assert!(usage.avail_bytes <= usage.total_bytes);
    }
}
