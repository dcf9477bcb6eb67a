//! Lightweight global metrics.
//!
//! Потокобезопасные атомарные счётчики для snapshot store:
//! - load (ok / missing file / failed and discarded)
//! - save (ok / failed), bytes read/written
//! - quarantine of corrupt files

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

// ----- Load -----
static SNAP_LOADS_OK: AtomicU64 = AtomicU64::new(0);
static SNAP_LOADS_MISSING: AtomicU64 = AtomicU64::new(0);
static SNAP_LOAD_FAILURES: AtomicU64 = AtomicU64::new(0);
static SNAP_BYTES_READ: AtomicU64 = AtomicU64::new(0);

// ----- Save -----
static SNAP_SAVES_OK: AtomicU64 = AtomicU64::new(0);
static SNAP_SAVE_FAILURES: AtomicU64 = AtomicU64::new(0);
static SNAP_BYTES_WRITTEN: AtomicU64 = AtomicU64::new(0);

// ----- Quarantine -----
static SNAP_QUARANTINED: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsSnapshot {
    pub snapshot_loads_ok: u64,
    pub snapshot_loads_missing: u64,
    pub snapshot_load_failures: u64,
    pub snapshot_bytes_read: u64,

    pub snapshot_saves_ok: u64,
    pub snapshot_save_failures: u64,
    pub snapshot_bytes_written: u64,

    pub snapshot_quarantined: u64,
}

impl MetricsSnapshot {
    pub fn avg_save_bytes(&self) -> f64 {
        if self.snapshot_saves_ok == 0 {
            0.0
        } else {
            self.snapshot_bytes_written as f64 / self.snapshot_saves_ok as f64
        }
    }
}

// ----- Recorders (Load) -----
pub fn record_load_ok(bytes: usize) {
    SNAP_LOADS_OK.fetch_add(1, Ordering::Relaxed);
    SNAP_BYTES_READ.fetch_add(bytes as u64, Ordering::Relaxed);
}

pub fn record_load_missing() {
    SNAP_LOADS_MISSING.fetch_add(1, Ordering::Relaxed);
}

pub fn record_load_failure() {
    SNAP_LOAD_FAILURES.fetch_add(1, Ordering::Relaxed);
}

// ----- Recorders (Save) -----
pub fn record_save_ok(bytes: u64) {
    SNAP_SAVES_OK.fetch_add(1, Ordering::Relaxed);
    SNAP_BYTES_WRITTEN.fetch_add(bytes, Ordering::Relaxed);
}

pub fn record_save_failure() {
    SNAP_SAVE_FAILURES.fetch_add(1, Ordering::Relaxed);
}

pub fn record_quarantine() {
    SNAP_QUARANTINED.fetch_add(1, Ordering::Relaxed);
}

// ----- Snapshot / Reset -----
pub fn snapshot() -> MetricsSnapshot {
    MetricsSnapshot {
        snapshot_loads_ok: SNAP_LOADS_OK.load(Ordering::Relaxed),
        snapshot_loads_missing: SNAP_LOADS_MISSING.load(Ordering::Relaxed),
        snapshot_load_failures: SNAP_LOAD_FAILURES.load(Ordering::Relaxed),
        snapshot_bytes_read: SNAP_BYTES_READ.load(Ordering::Relaxed),

        snapshot_saves_ok: SNAP_SAVES_OK.load(Ordering::Relaxed),
        snapshot_save_failures: SNAP_SAVE_FAILURES.load(Ordering::Relaxed),
        snapshot_bytes_written: SNAP_BYTES_WRITTEN.load(Ordering::Relaxed),

        snapshot_quarantined: SNAP_QUARANTINED.load(Ordering::Relaxed),
    }
}
