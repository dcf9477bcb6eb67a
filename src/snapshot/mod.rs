//! snapshot — the whole application state persisted as one file.
//!
//! Состав:
//! - Snapshot / SnapshotView: the aggregate (owned / borrowed).
//! - SnapshotStore: load/save of the aggregate as a unit.
//! - codec.rs: binary frame (header + crc32 + JSON payload, optional zstd).
//!
//! Политика:
//! - load(): missing file -> empty snapshot; unreadable/corrupt file -> error is
//!   logged, the file is moved aside to `<file>.corrupt-<unix_ms>`, empty snapshot.
//! - save(): full rewrite through tmp+rename; failure is logged and reported
//!   as `false`, never raised. In-memory state stays authoritative.
//! - try_load()/try_save() expose the same operations with the error.

pub mod codec;

use anyhow::{Context, Result};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::RmsConfig;
use crate::consts::{CORRUPT_SUFFIX, TMP_SUFFIX};
use crate::metrics;
use crate::model::{Customer, MenuItem, Order};
use crate::util::{fsync_dir, now_unix_ms, sibling_path};

pub use codec::{decode_snapshot, encode_snapshot, read_header, SnapHeader};

/// Complete persisted state at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<Order>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.menu_items.is_empty() && self.orders.is_empty()
    }

    pub fn view(&self) -> SnapshotView<'_> {
        SnapshotView {
            customers: &self.customers,
            menu_items: &self.menu_items,
            orders: &self.orders,
        }
    }
}

/// Borrowed form used for writing; serializes exactly like `Snapshot`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SnapshotView<'a> {
    pub customers: &'a [Customer],
    pub menu_items: &'a [MenuItem],
    pub orders: &'a [Order],
}

pub struct SnapshotStore {
    path: PathBuf,
    codec: u16,
    fsync: bool,
}

impl SnapshotStore {
    pub fn new(cfg: &RmsConfig) -> Self {
        Self {
            path: cfg.data_file.clone(),
            codec: cfg.codec,
            fsync: cfg.fsync,
        }
    }

    /// Store at `path` with default codec/fsync settings.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(&RmsConfig::default().with_data_file(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> u16 {
        self.codec
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the snapshot. A missing file is an empty snapshot, not an error.
    pub fn try_load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            debug!("snapshot: {} not found, starting empty", self.path.display());
            metrics::record_load_missing();
            return Ok(Snapshot::default());
        }
        let buf = fs::read(&self.path)
            .with_context(|| format!("read snapshot {}", self.path.display()))?;
        let snap = decode_snapshot(&buf)
            .with_context(|| format!("decode snapshot {}", self.path.display()))?;
        metrics::record_load_ok(buf.len());
        debug!(
            "snapshot: loaded {} B from {} (customers={}, menu_items={}, orders={})",
            buf.len(),
            self.path.display(),
            snap.customers.len(),
            snap.menu_items.len(),
            snap.orders.len()
        );
        Ok(snap)
    }

    /// Never fails: on any error the problem is logged, the bad file is moved
    /// aside and an empty snapshot is returned.
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(s) => s,
            Err(e) => {
                error!("snapshot load failed, starting with empty data: {:#}", e);
                metrics::record_load_failure();
                if let Err(qe) = self.quarantine() {
                    warn!("snapshot: could not move corrupt file aside: {:#}", qe);
                }
                Snapshot::default()
            }
        }
    }

    /// Serialize the three collections and replace the file. Returns bytes written.
    pub fn try_save(&self, customers: &[Customer], menu_items: &[MenuItem], orders: &[Order]) -> Result<u64> {
        let view = SnapshotView {
            customers,
            menu_items,
            orders,
        };
        let bytes = encode_snapshot(view, self.codec)?;
        self.write_atomic(&bytes)?;
        metrics::record_save_ok(bytes.len() as u64);
        debug!(
            "snapshot: wrote {} B to {} (customers={}, menu_items={}, orders={})",
            bytes.len(),
            self.path.display(),
            customers.len(),
            menu_items.len(),
            orders.len()
        );
        Ok(bytes.len() as u64)
    }

    /// Like `try_save`, but failures are only logged. Returns whether the write succeeded.
    pub fn save(&self, customers: &[Customer], menu_items: &[MenuItem], orders: &[Order]) -> bool {
        match self.try_save(customers, menu_items, orders) {
            Ok(_) => true,
            Err(e) => {
                error!("snapshot save failed (in-memory data kept): {:#}", e);
                metrics::record_save_failure();
                false
            }
        }
    }

    /// Rename the current file to `<file>.corrupt-<unix_ms>`.
    /// Returns the new path, or None if there was nothing to move.
    pub fn quarantine(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let dst = sibling_path(&self.path, &format!("{}-{}", CORRUPT_SUFFIX, now_unix_ms()));
        fs::rename(&self.path, &dst)
            .with_context(|| format!("rename {} -> {}", self.path.display(), dst.display()))?;
        metrics::record_quarantine();
        warn!("snapshot: moved unreadable file to {}", dst.display());
        Ok(Some(dst))
    }

    // tmp + rename, затем fsync родительского каталога (best-effort).
    fn write_atomic(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create dir {}", parent.display()))?;
            }
        }

        let tmp = sibling_path(&self.path, TMP_SUFFIX);
        let _ = fs::remove_file(&tmp);

        if let Err(e) = write_tmp(&tmp, bytes, self.fsync) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e)
                .with_context(|| format!("rename {} -> {}", tmp.display(), self.path.display()));
        }
        if self.fsync {
            let _ = fsync_dir(&self.path);
        }
        Ok(())
    }
}

fn write_tmp(tmp: &Path, bytes: &[u8], fsync: bool) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)
        .with_context(|| format!("open snapshot tmp {}", tmp.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write snapshot tmp {}", tmp.display()))?;
    if fsync {
        f.sync_all()?;
    }
    Ok(())
}
