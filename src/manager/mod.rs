//! In-memory managers: one collection per entity type, id allocation and CRUD.
//!
//! - customer.rs: CustomerManager
//! - menu_item.rs: MenuItemManager
//! - order.rs: OrderManager
//! - table.rs: IdTable (shared storage + next-id counter)
//!
//! Contract shared by all managers:
//! - `add` returns the stored record; it fails only once `Id::MAX` is taken;
//! - `update`/`delete` on an unknown id return `false` and change nothing;
//! - `find_by_id`/`get_all` hand out clones, so callers cannot alias state;
//! - `load_all` replaces everything and recomputes the next id.
//!
//! No I/O and no validation happen here.

mod customer;
mod menu_item;
mod order;
mod table;

pub use customer::CustomerManager;
pub use menu_item::MenuItemManager;
pub use order::OrderManager;
