use anyhow::{Context, Result};

use triobites::{RmsConfig, SnapshotStore};

/// Strict variant of the startup load: a corrupt file is an error here
/// instead of being replaced by an empty state.
pub fn exec(cfg: &RmsConfig) -> Result<()> {
    let store = SnapshotStore::new(cfg);
    if !store.exists() {
        println!("OK: {} does not exist (empty state)", store.path().display());
        return Ok(());
    }
    let snap = store
        .try_load()
        .with_context(|| format!("check {}", store.path().display()))?;

    // Повторяющиеся id не ломают загрузку, но стоит о них знать.
    let dup_customers = duplicates(snap.customers.iter().map(|c| c.id));
    let dup_menu = duplicates(snap.menu_items.iter().map(|m| m.id));
    let dup_orders = duplicates(snap.orders.iter().map(|o| o.id));
    for (kind, ids) in [("customer", &dup_customers), ("menu item", &dup_menu), ("order", &dup_orders)] {
        if !ids.is_empty() {
            eprintln!("warning: duplicate {} ids: {:?}", kind, ids);
        }
    }

    println!(
        "OK: {} (customers={}, menu_items={}, orders={})",
        store.path().display(),
        snap.customers.len(),
        snap.menu_items.len(),
        snap.orders.len()
    );
    Ok(())
}

fn duplicates(ids: impl Iterator<Item = u32>) -> Vec<u32> {
    let mut v: Vec<u32> = ids.collect();
    v.sort_unstable();
    let mut out: Vec<u32> = v.windows(2).filter(|w| w[0] == w[1]).map(|w| w[0]).collect();
    out.dedup();
    out
}
