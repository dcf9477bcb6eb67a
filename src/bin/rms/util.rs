use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

use triobites::{RmsConfig, Session, Snapshot, SnapshotStore};

pub fn config(data: Option<PathBuf>) -> RmsConfig {
    let cfg = RmsConfig::from_env();
    match data {
        Some(p) => cfg.with_data_file(p),
        None => cfg,
    }
}

/// Read-only view for list/show: no lock, no rewrite, and a corrupt file is
/// an error instead of being moved aside.
pub fn read_snapshot(cfg: &RmsConfig) -> Result<Snapshot> {
    let store = SnapshotStore::new(cfg);
    store
        .try_load()
        .with_context(|| format!("read {} (run `rms check`)", store.path().display()))
}

/// "<menu_id>[:qty]" -> (menu_id, qty); qty defaults to 1.
pub fn parse_item_spec(s: &str) -> Result<(u32, u32)> {
    let s = s.trim();
    let (id, qty) = match s.split_once(':') {
        Some((id, qty)) => (id, Some(qty)),
        None => (s, None),
    };
    let id: u32 = id
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid menu item id in '{}'", s))?;
    let qty: u32 = match qty {
        Some(q) => q
            .trim()
            .parse()
            .map_err(|_| anyhow!("invalid quantity in '{}'", s))?,
        None => 1,
    };
    Ok((id, qty))
}

pub fn money(v: f64) -> String {
    format!("{:.2}", v)
}

/// Final save + lock release. A failed write is reported but not fatal:
/// the change was applied, only persisting it failed.
pub fn finish(session: Session) {
    let path = session.store().path().to_path_buf();
    if !session.close() {
        eprintln!("warning: could not write snapshot {}", path.display());
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(v: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v)?);
    Ok(())
}
