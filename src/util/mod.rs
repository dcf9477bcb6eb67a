//! util — общие утилиты.
//!
//! Содержит:
//! - now_unix_ms(): текущее Unix-время в миллисекундах.
//! - sibling_path(): путь рядом с файлом снапшота (`<file>.<suffix>`).
//! - fsync_dir(): best-effort fsync родительского каталога после rename.

use std::path::{Path, PathBuf};

/// Текущее Unix-время в миллисекундах.
#[inline]
pub fn now_unix_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// `<path>.<suffix>` — keeps the full file name, unlike `with_extension`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(".");
    s.push(suffix);
    PathBuf::from(s)
}

#[cfg(unix)]
pub fn fsync_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let dir = std::fs::File::open(parent)?;
            dir.sync_all()?;
        }
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn fsync_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
