use anyhow::Result;
use serde_json::json;
use std::fs;

use triobites::config::codec_name;
use triobites::snapshot::{read_header, SnapHeader};
use triobites::{metrics, RmsConfig, SnapshotStore};

/// Read-only: never takes the lock and never rewrites the file.
pub fn exec(cfg: &RmsConfig, json: bool) -> Result<()> {
    let store = SnapshotStore::new(cfg);
    let path = store.path();

    let file_len = fs::metadata(path).map(|m| m.len()).ok();
    let header: Option<Result<SnapHeader>> = if file_len.is_some() {
        Some(fs::read(path).map_err(anyhow::Error::from).and_then(|b| read_header(&b)))
    } else {
        None
    };
    let loaded = store.try_load();
    let ms = metrics::snapshot();

    if json {
        let header_json = match &header {
            Some(Ok(h)) => json!({
                "version": h.version,
                "codec": codec_name(h.codec),
                "flags": h.flags,
                "payload_len": h.payload_len,
                "crc32": format!("{:08x}", h.crc32),
            }),
            Some(Err(e)) => json!({ "error": format!("{:#}", e) }),
            None => serde_json::Value::Null,
        };
        let data_json = match &loaded {
            Ok(s) => json!({
                "ok": true,
                "customers": s.customers.len(),
                "menu_items": s.menu_items.len(),
                "orders": s.orders.len(),
            }),
            Err(e) => json!({ "ok": false, "error": format!("{:#}", e) }),
        };
        let out = json!({
            "path": path.display().to_string(),
            "exists": file_len.is_some(),
            "file_len": file_len,
            "write_codec": codec_name(store.codec()),
            "header": header_json,
            "data": data_json,
            "metrics": ms,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Snapshot: {}", path.display());
    match file_len {
        None => println!("  (file not found; next save creates it)"),
        Some(n) => println!("  size        = {} B", n),
    }
    match &header {
        Some(Ok(h)) => {
            println!("  version     = {}", h.version);
            println!("  codec       = {}", codec_name(h.codec));
            println!("  payload_len = {} B", h.payload_len);
            println!("  crc32       = {:08x}", h.crc32);
        }
        Some(Err(e)) => println!("  header      = INVALID ({:#})", e),
        None => {}
    }
    match &loaded {
        Ok(s) => {
            println!("  customers   = {}", s.customers.len());
            println!("  menu_items  = {}", s.menu_items.len());
            println!("  orders      = {}", s.orders.len());
            let revenue: f64 = s.orders.iter().map(|o| o.total()).sum();
            println!("  revenue     = {:.2}", revenue);
        }
        Err(e) => println!("  data        = UNREADABLE ({:#})", e),
    }
    println!("  write codec = {}", codec_name(store.codec()));
    Ok(())
}
