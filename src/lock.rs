//! File-based locking so only one session owns a snapshot file at a time.
//!
//! Cross-platform (fs2) advisory lock on `<data_file>.lock`.
//! Lock is released on Drop.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::consts::LOCK_SUFFIX;
use crate::util::sibling_path;

pub struct LockGuard {
    file: std::fs::File,
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            log::debug!("unlock {} failed: {}", self.path.display(), e);
        }
    }
}

pub fn lock_file_path(data_file: &Path) -> PathBuf {
    sibling_path(data_file, LOCK_SUFFIX)
}

fn open_lock_file(data_file: &Path) -> Result<(std::fs::File, PathBuf)> {
    let path = lock_file_path(data_file);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }
    let f = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(&path)
        .with_context(|| format!("open lock file {}", path.display()))?;
    Ok((f, path))
}

/// Try to acquire the exclusive lock. Returns Err if another process holds it.
pub fn try_acquire_exclusive_lock(data_file: &Path) -> Result<LockGuard> {
    let (file, path) = open_lock_file(data_file)?;
    file.try_lock_exclusive().with_context(|| {
        format!(
            "snapshot {} is in use by another process (lock {})",
            data_file.display(),
            path.display()
        )
    })?;
    Ok(LockGuard { file, path })
}
