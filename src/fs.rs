//! File-System Port
//!
//! Narrow interface over the handful of primitives the pipeline needs, so
//! the orchestrator never reaches for ambient globals and tests can observe
//! every touch of the disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Direct children of `path`, sorted by file name for deterministic
    /// processing order.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Recursive delete. Absence of `path` is not an error.
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Recursive copy of `src`'s contents into `dst`, preserving relative
    /// structure. `dst` is created if missing.
    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()>;
}

/// [`FileStore`] backed by `std::fs`.
pub struct OsFileStore;

impl FileStore for OsFileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn copy_tree(&self, src: &Path, dst: &Path) -> io::Result<()> {
        for entry in WalkDir::new(src) {
            let entry = entry.map_err(io::Error::other)?;
            let relative = entry
                .path()
                .strip_prefix(src)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            let target = dst.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target)?;
            } else {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(entry.path(), &target)?;
            }
        }
        Ok(())
    }
}
