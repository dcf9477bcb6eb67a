//! Entity records: plain serde-able values.
//!
//! - customer.rs: Customer
//! - menu_item.rs: MenuItem
//! - order.rs: OrderItem, Order, OrderDraft
//! - float_repr.rs: serde helper for f64 fields (inf/NaN included)
//!
//! Order/OrderItem carry denormalized copies (customer name, menu item name,
//! unit price) taken when the order line was built. They are never re-synced
//! with the live Customer/MenuItem records.

mod customer;
mod float_repr;
mod menu_item;
mod order;

pub use customer::Customer;
pub use menu_item::MenuItem;
pub use order::{Order, OrderDraft, OrderItem};

/// Integer identifier assigned by a manager.
pub type Id = u32;

/// Anything stored in an id table.
pub trait Record: Clone {
    fn id(&self) -> Id;
}
