//! Session — the application shell core.
//!
//! Owns the three managers and the snapshot store (no globals; callers get
//! `&Session` / `&mut Session`). Responsibilities:
//! - hydrate managers from `SnapshotStore::load()` on open;
//! - validate user input before it reaches a manager;
//! - build order lines from the live menu (denormalized copies);
//! - persist the full state after every successful mutation;
//! - persist once more on `close()` or, failing that, on Drop.

use anyhow::{anyhow, bail, Result};
use log::{info, warn};

use crate::config::RmsConfig;
use crate::lock::{try_acquire_exclusive_lock, LockGuard};
use crate::manager::{CustomerManager, MenuItemManager, OrderManager};
use crate::model::{Customer, Id, MenuItem, Order, OrderDraft, OrderItem};
use crate::snapshot::SnapshotStore;

pub struct Session {
    customers: CustomerManager,
    menu: MenuItemManager,
    orders: OrderManager,
    store: SnapshotStore,
    last_save_ok: bool,
    closed: bool,
    // Released only after Drop::drop has run the final persist.
    _lock: Option<LockGuard>,
}

impl Session {
    pub fn open(cfg: &RmsConfig) -> Result<Self> {
        let lock = if cfg.lock {
            Some(try_acquire_exclusive_lock(&cfg.data_file)?)
        } else {
            None
        };

        let store = SnapshotStore::new(cfg);
        let snap = store.load();

        let mut customers = CustomerManager::new();
        let mut menu = MenuItemManager::new();
        let mut orders = OrderManager::new();
        customers.load_all(snap.customers);
        menu.load_all(snap.menu_items);
        orders.load_all(snap.orders);

        info!(
            "session: {} customers, {} menu items, {} orders from {}",
            customers.len(),
            menu.len(),
            orders.len(),
            store.path().display()
        );

        Ok(Self {
            customers,
            menu,
            orders,
            store,
            last_save_ok: true,
            closed: false,
            _lock: lock,
        })
    }

    pub fn customers(&self) -> &CustomerManager {
        &self.customers
    }

    pub fn menu(&self) -> &MenuItemManager {
        &self.menu
    }

    pub fn orders(&self) -> &OrderManager {
        &self.orders
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Whether the most recent save reached the disk.
    pub fn last_save_ok(&self) -> bool {
        self.last_save_ok
    }

    /// Full save of all three collections. Failure is logged by the store.
    pub fn persist(&mut self) -> bool {
        self.last_save_ok = self
            .store
            .save(self.customers.rows(), self.menu.rows(), self.orders.rows());
        self.last_save_ok
    }

    /// Final save; the lock is released when `self` goes away.
    pub fn close(mut self) -> bool {
        self.closed = true;
        self.persist()
    }

    // ---------------- customers ----------------

    pub fn add_customer(&mut self, name: &str, phone: &str) -> Result<Customer> {
        let name = required_name(name)?;
        let c = self.customers.add(name, phone.trim())?;
        self.persist();
        Ok(c)
    }

    /// Ok(false) if there is no customer `id`.
    pub fn update_customer(&mut self, id: Id, name: &str, phone: &str) -> Result<bool> {
        let name = required_name(name)?;
        if !self.customers.update(id, name, phone.trim()) {
            warn!("update_customer: no customer with id {}", id);
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    /// Orders that reference the customer keep their copied name.
    pub fn delete_customer(&mut self, id: Id) -> bool {
        if !self.customers.delete(id) {
            warn!("delete_customer: no customer with id {}", id);
            return false;
        }
        self.persist();
        true
    }

    // ---------------- menu ----------------

    pub fn add_menu_item(&mut self, name: &str, price: f64) -> Result<MenuItem> {
        let name = required_name(name)?;
        let price = finite_price(price)?;
        let m = self.menu.add(name, price)?;
        self.persist();
        Ok(m)
    }

    pub fn update_menu_item(&mut self, id: Id, name: &str, price: f64) -> Result<bool> {
        let name = required_name(name)?;
        let price = finite_price(price)?;
        if !self.menu.update(id, name, price) {
            warn!("update_menu_item: no menu item with id {}", id);
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    pub fn delete_menu_item(&mut self, id: Id) -> bool {
        if !self.menu.delete(id) {
            warn!("delete_menu_item: no menu item with id {}", id);
            return false;
        }
        self.persist();
        true
    }

    // ---------------- orders ----------------

    /// Build an order line from the current menu entry `menu_item_id`.
    pub fn draft_line(&self, menu_item_id: Id, quantity: u32) -> Result<OrderItem> {
        if quantity == 0 {
            bail!("quantity must be >= 1");
        }
        let item = self
            .menu
            .find_by_id(menu_item_id)
            .ok_or_else(|| anyhow!("unknown menu item {}", menu_item_id))?;
        Ok(OrderItem::from_menu_item(&item, quantity))
    }

    /// Draft seeded from an existing order, for editing.
    pub fn draft_from_order(&self, id: Id) -> Option<OrderDraft> {
        self.orders.find_by_id(id).map(|o| OrderDraft::from_order(&o))
    }

    pub fn place_order(&mut self, customer_id: Id, draft: &OrderDraft) -> Result<Order> {
        let customer = self.order_customer(customer_id, draft)?;
        let o = self.orders.add(customer.id, customer.name, draft.lines())?;
        self.persist();
        Ok(o)
    }

    pub fn update_order(&mut self, id: Id, customer_id: Id, draft: &OrderDraft) -> Result<bool> {
        let customer = self.order_customer(customer_id, draft)?;
        if !self.orders.update(id, customer.id, customer.name, draft.lines()) {
            warn!("update_order: no order with id {}", id);
            return Ok(false);
        }
        self.persist();
        Ok(true)
    }

    pub fn delete_order(&mut self, id: Id) -> bool {
        if !self.orders.delete(id) {
            warn!("delete_order: no order with id {}", id);
            return false;
        }
        self.persist();
        true
    }

    fn order_customer(&self, customer_id: Id, draft: &OrderDraft) -> Result<Customer> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .ok_or_else(|| anyhow!("unknown customer {}", customer_id))?;
        if draft.is_empty() {
            bail!("add at least one item");
        }
        // строки могли быть собраны в обход draft_line
        for (i, line) in draft.lines().iter().enumerate() {
            if line.quantity == 0 {
                bail!("quantity must be >= 1 (line {})", i + 1);
            }
            if !line.unit_price.is_finite() {
                bail!("price must be a number (line {})", i + 1);
            }
        }
        Ok(customer)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.closed {
            self.persist();
        }
    }
}

/// Parse a user-supplied price ("9.5", " 12 ").
pub fn parse_price(s: &str) -> Result<f64> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| anyhow!("price must be a number (got '{}')", s.trim()))?;
    finite_price(v)
}

fn finite_price(v: f64) -> Result<f64> {
    if !v.is_finite() {
        bail!("price must be a number (got {})", v);
    }
    Ok(v)
}

fn required_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        bail!("name required");
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_accepts_numbers_only() {
        assert_eq!(parse_price("9.5").unwrap(), 9.5);
        assert_eq!(parse_price(" 12 ").unwrap(), 12.0);
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("inf").is_err());
    }

    #[test]
    fn required_name_trims() {
        assert_eq!(required_name("  Ana ").unwrap(), "Ana");
        assert!(required_name("   ").is_err());
    }
}
