use anyhow::Result;

use crate::model::{Id, Order, OrderItem};
use crate::util::now_unix_ms;

use super::table::IdTable;

#[derive(Debug, Clone, Default)]
pub struct OrderManager {
    table: IdTable<Order>,
}

impl OrderManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new order; `items` is copied, `created_unix_ms` is stamped now.
    pub fn add(
        &mut self,
        customer_id: Id,
        customer_name: impl Into<String>,
        items: &[OrderItem],
    ) -> Result<Order> {
        let o = Order {
            id: self.table.allocate()?,
            customer_id,
            customer_name: customer_name.into(),
            created_unix_ms: now_unix_ms(),
            items: items.to_vec(),
        };
        self.table.push(o.clone());
        Ok(o)
    }

    /// Replace customer and lines of order `id`. created_unix_ms is kept.
    pub fn update(
        &mut self,
        id: Id,
        customer_id: Id,
        customer_name: impl Into<String>,
        items: &[OrderItem],
    ) -> bool {
        match self.table.get_mut(id) {
            Some(o) => {
                o.customer_id = customer_id;
                o.customer_name = customer_name.into();
                o.items = items.to_vec();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: Id) -> bool {
        self.table.delete(id)
    }

    pub fn find_by_id(&self, id: Id) -> Option<Order> {
        self.table.find(id)
    }

    pub fn get_all(&self) -> Vec<Order> {
        self.table.all()
    }

    pub(crate) fn rows(&self) -> &[Order] {
        self.table.rows()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.table.iter()
    }

    pub fn load_all(&mut self, orders: Vec<Order>) {
        self.table.load(orders);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn next_id(&self) -> Option<Id> {
        self.table.next_id()
    }
}
