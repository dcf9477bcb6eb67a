use serde::{Deserialize, Serialize};

use super::{Id, MenuItem, Record};

/// One order line. Name and price are copies taken from the menu item when
/// the line was built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item_id: Id,
    pub menu_item_name: String,
    #[serde(with = "super::float_repr")]
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(menu_item_id: Id, menu_item_name: impl Into<String>, unit_price: f64, quantity: u32) -> Self {
        Self {
            menu_item_id,
            menu_item_name: menu_item_name.into(),
            unit_price,
            quantity,
        }
    }

    /// Capture the current name/price of `item`.
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self::new(item.id, item.name.clone(), item.price, quantity)
    }

    #[inline]
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Id,
    pub customer_id: Id,
    pub customer_name: String,
    /// Set once by `OrderManager::add`.
    pub created_unix_ms: u64,
    /// Insertion order is significant.
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Record for Order {
    fn id(&self) -> Id {
        self.id
    }
}

/// Order lines being edited before they are handed to the order manager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    lines: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a draft from an existing order (for updates).
    pub fn from_order(order: &Order) -> Self {
        Self {
            lines: order.items.clone(),
        }
    }

    pub fn push(&mut self, line: OrderItem) {
        self.lines.push(line);
    }

    /// Remove the line at `index`; out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<OrderItem> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    pub fn lines(&self) -> &[OrderItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with(items: Vec<OrderItem>) -> Order {
        Order {
            id: 1,
            customer_id: 1,
            customer_name: "Ana".into(),
            created_unix_ms: 0,
            items,
        }
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let o = order_with(vec![
            OrderItem::new(1, "Pizza", 9.5, 2),
            OrderItem::new(2, "Soda", 1.25, 4),
        ]);
        assert_eq!(o.items[0].line_total(), 19.0);
        assert_eq!(o.total(), 24.0);
        assert_eq!(o.item_count(), 2);
        assert_eq!(order_with(Vec::new()).total(), 0.0);
    }

    #[test]
    fn draft_push_remove_tracks_total() {
        let mut d = OrderDraft::new();
        d.push(OrderItem::new(1, "Pizza", 9.5, 2));
        d.push(OrderItem::new(2, "Soda", 2.0, 1));
        assert_eq!(d.total(), 21.0);

        let gone = d.remove(0).expect("line 0 exists");
        assert_eq!(gone.menu_item_name, "Pizza");
        assert_eq!(d.total(), 2.0);
        assert!(d.remove(5).is_none());
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn line_copies_menu_values() {
        let mut m = MenuItem::new(3, "Soup", 4.0);
        let line = OrderItem::from_menu_item(&m, 3);
        m.name = "Stew".into();
        m.price = 7.0;
        assert_eq!(line.menu_item_name, "Soup");
        assert_eq!(line.unit_price, 4.0);
        assert_eq!(line.line_total(), 12.0);
    }
}
