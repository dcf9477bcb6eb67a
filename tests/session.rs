use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use triobites::{Customer, Id, OrderDraft, OrderItem, RmsConfig, Session, SnapshotStore, StoreBuilder};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("rmstest-session-{prefix}-{pid}-{t}-{id}"))
}

fn cfg_for(prefix: &str) -> RmsConfig {
    StoreBuilder::from_default()
        .data_file(unique_root(prefix).join("rms_data.snap"))
        .build()
}

#[test]
fn scenario_ana_orders_pizza() -> Result<()> {
    let cfg = cfg_for("scenario");
    let mut s = Session::open(&cfg)?;

    let ana = s.add_customer("Ana", "555-1")?;
    let pizza = s.add_menu_item("Pizza", 9.5)?;

    let mut draft = OrderDraft::new();
    draft.push(s.draft_line(pizza.id, 2)?);
    let o = s.place_order(ana.id, &draft)?;

    assert_eq!(o.customer_name, "Ana");
    assert_eq!(o.items.len(), 1);
    assert_eq!(o.items[0].menu_item_id, 1);
    assert_eq!(o.total(), 19.0);
    assert!(s.close());
    Ok(())
}

#[test]
fn every_mutation_is_persisted_immediately() -> Result<()> {
    let cfg = cfg_for("persist").with_lock(false);
    let store = SnapshotStore::new(&cfg);
    let mut s = Session::open(&cfg)?;

    let ana = s.add_customer("Ana", "555-1")?;
    assert_eq!(store.try_load()?.customers.len(), 1);

    s.update_customer(ana.id, "Ana B", "")?;
    assert_eq!(store.try_load()?.customers[0].name, "Ana B");

    let pizza = s.add_menu_item("Pizza", 9.5)?;
    assert_eq!(store.try_load()?.menu_items.len(), 1);

    let mut draft = OrderDraft::new();
    draft.push(s.draft_line(pizza.id, 1)?);
    let o = s.place_order(ana.id, &draft)?;
    assert_eq!(store.try_load()?.orders.len(), 1);

    assert!(s.delete_order(o.id));
    assert!(store.try_load()?.orders.is_empty());

    assert!(s.delete_menu_item(pizza.id));
    assert!(s.delete_customer(ana.id));
    assert!(store.try_load()?.is_empty());
    assert!(s.last_save_ok());
    Ok(())
}

#[test]
fn reopen_hydrates_and_continues_ids() -> Result<()> {
    let cfg = cfg_for("reopen");
    {
        let mut s = Session::open(&cfg)?;
        s.add_customer("Ana", "")?;
        s.add_customer("Bo", "")?;
        s.add_customer("Cy", "")?;
        assert!(s.delete_customer(3));
        s.add_menu_item("Pizza", 9.5)?;
        // no close(): Drop must persist and release the lock
    }
    let mut s = Session::open(&cfg)?;
    assert_eq!(s.customers().len(), 2);
    assert_eq!(s.menu().len(), 1);
    // next id is max(existing)+1 = 3, deleted id 3 gets reused after a reload
    assert_eq!(s.customers().next_id(), Some(3));
    assert_eq!(s.add_customer("Di", "")?.id, 3);
    assert!(s.close());
    Ok(())
}

#[test]
fn validation_errors_leave_state_alone() -> Result<()> {
    let cfg = cfg_for("validate");
    let mut s = Session::open(&cfg)?;

    assert!(s.add_customer("   ", "555").is_err());
    assert!(s.add_menu_item("", 1.0).is_err());
    assert!(s.add_menu_item("Pizza", f64::NAN).is_err());
    assert!(s.customers().is_empty());
    assert!(s.menu().is_empty());

    let ana = s.add_customer("Ana", "")?;
    let pizza = s.add_menu_item("Pizza", 9.5)?;

    assert!(s.draft_line(pizza.id, 0).is_err(), "quantity 0 rejected");
    assert!(s.draft_line(99, 1).is_err(), "unknown menu item rejected");

    let empty = OrderDraft::new();
    assert!(s.place_order(ana.id, &empty).is_err(), "empty order rejected");

    let mut draft = OrderDraft::new();
    draft.push(s.draft_line(pizza.id, 1)?);
    assert!(s.place_order(42, &draft).is_err(), "unknown customer rejected");
    assert!(s.orders().is_empty());

    assert!(!s.update_customer(42, "Zed", "")?);
    assert!(!s.update_menu_item(42, "Zed", 1.0)?);
    assert!(!s.delete_order(42));
    assert!(s.close());
    Ok(())
}

#[test]
fn menu_edits_do_not_touch_existing_orders() -> Result<()> {
    let cfg = cfg_for("denorm");
    let mut s = Session::open(&cfg)?;

    let ana = s.add_customer("Ana", "555-1")?;
    let pizza = s.add_menu_item("Pizza", 9.5)?;
    let mut draft = OrderDraft::new();
    draft.push(s.draft_line(pizza.id, 2)?);
    let o = s.place_order(ana.id, &draft)?;

    assert!(s.update_menu_item(pizza.id, "Pizza XL", 15.0)?);
    assert!(s.update_customer(ana.id, "Ana Renamed", "")?);
    assert!(s.delete_menu_item(pizza.id));
    assert!(s.delete_customer(ana.id));
    assert!(s.close());

    let s = Session::open(&cfg)?;
    let kept = s.orders().find_by_id(o.id).expect("order survives");
    assert_eq!(kept.customer_name, "Ana");
    assert_eq!(kept.items[0].menu_item_name, "Pizza");
    assert_eq!(kept.items[0].unit_price, 9.5);
    assert_eq!(kept.total(), 19.0);
    assert!(s.customers().find_by_id(ana.id).is_none());
    Ok(())
}

#[test]
fn editing_an_order_through_a_draft() -> Result<()> {
    let cfg = cfg_for("draft");
    let mut s = Session::open(&cfg)?;

    let ana = s.add_customer("Ana", "")?;
    let bo = s.add_customer("Bo", "")?;
    let pizza = s.add_menu_item("Pizza", 9.5)?;
    let soda = s.add_menu_item("Soda", 2.0)?;

    let mut draft = OrderDraft::new();
    draft.push(s.draft_line(pizza.id, 1)?);
    draft.push(s.draft_line(soda.id, 2)?);
    let o = s.place_order(ana.id, &draft)?;

    let mut edit = s.draft_from_order(o.id).expect("draft for existing order");
    assert_eq!(edit.total(), 13.5);
    edit.remove(0);
    edit.push(s.draft_line(pizza.id, 3)?);
    assert!(s.update_order(o.id, bo.id, &edit)?);

    let got = s.orders().find_by_id(o.id).expect("order");
    assert_eq!(got.created_unix_ms, o.created_unix_ms);
    assert_eq!(got.customer_name, "Bo");
    let names: Vec<&str> = got.items.iter().map(|l| l.menu_item_name.as_str()).collect();
    assert_eq!(names, vec!["Soda", "Pizza"]);
    assert_eq!(got.total(), 4.0 + 28.5);

    assert!(s.draft_from_order(99).is_none());
    assert!(!s.update_order(99, bo.id, &edit)?);
    assert!(s.close());
    Ok(())
}

#[test]
fn second_session_on_same_file_is_refused() -> Result<()> {
    let cfg = cfg_for("lock");
    let first = Session::open(&cfg)?;
    assert!(Session::open(&cfg).is_err());
    assert!(first.close());

    let again = Session::open(&cfg)?;
    assert!(again.close());
    Ok(())
}

#[test]
fn corrupt_snapshot_opens_empty_session() -> Result<()> {
    let cfg = cfg_for("corrupt");
    {
        let mut s = Session::open(&cfg)?;
        s.add_customer("Ana", "")?;
        assert!(s.close());
    }
    std::fs::write(&cfg.data_file, b"RMSSNAP1 but then garbage")?;

    let mut s = Session::open(&cfg)?;
    assert!(s.customers().is_empty());
    assert_eq!(s.add_customer("Bo", "")?.id, 1);
    assert!(s.close());
    Ok(())
}

#[test]
fn hand_built_draft_lines_are_validated() -> Result<()> {
    let cfg = cfg_for("handlines");
    let mut s = Session::open(&cfg)?;
    let ana = s.add_customer("Ana", "")?;
    let pizza = s.add_menu_item("Pizza", 9.5)?;

    let mut zero_qty = OrderDraft::new();
    zero_qty.push(s.draft_line(pizza.id, 1)?);
    zero_qty.push(OrderItem::new(77, "Ghost", 5.0, 0));
    let err = s.place_order(ana.id, &zero_qty).unwrap_err();
    assert!(err.to_string().contains("quantity must be >= 1 (line 2)"), "{err}");

    let mut bad_price = OrderDraft::new();
    bad_price.push(OrderItem::new(pizza.id, "Pizza", f64::NAN, 1));
    assert!(s.place_order(ana.id, &bad_price).is_err());
    assert!(s.orders().is_empty());

    let mut good = OrderDraft::new();
    good.push(s.draft_line(pizza.id, 1)?);
    let o = s.place_order(ana.id, &good)?;
    assert!(s.update_order(o.id, ana.id, &zero_qty).is_err());
    assert_eq!(s.orders().find_by_id(o.id).map(|o| o.items.len()), Some(1));

    assert!(SnapshotStore::new(&cfg).try_load()?.orders[0].items.iter().all(|l| l.quantity >= 1));
    assert!(s.close());
    Ok(())
}

#[test]
fn exhausted_id_space_is_reported() -> Result<()> {
    let cfg = cfg_for("idmax");
    SnapshotStore::new(&cfg).try_save(&[Customer::new(Id::MAX, "Last", "")], &[], &[])?;

    let mut s = Session::open(&cfg)?;
    assert!(s.add_customer("Ana", "").is_err());
    assert_eq!(s.customers().len(), 1);
    // other collections are unaffected
    assert_eq!(s.add_menu_item("Pizza", 9.5)?.id, 1);
    assert!(s.close());
    Ok(())
}
