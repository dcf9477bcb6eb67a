use anyhow::Result;

use crate::model::{Id, MenuItem};

use super::table::IdTable;

#[derive(Debug, Clone, Default)]
pub struct MenuItemManager {
    table: IdTable<MenuItem>,
}

impl MenuItemManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails only when the id space is used up.
    pub fn add(&mut self, name: impl Into<String>, price: f64) -> Result<MenuItem> {
        let m = MenuItem::new(self.table.allocate()?, name, price);
        self.table.push(m.clone());
        Ok(m)
    }

    /// Replace name and price of item `id`. Existing orders keep their copies.
    pub fn update(&mut self, id: Id, name: impl Into<String>, price: f64) -> bool {
        match self.table.get_mut(id) {
            Some(m) => {
                m.name = name.into();
                m.price = price;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: Id) -> bool {
        self.table.delete(id)
    }

    pub fn find_by_id(&self, id: Id) -> Option<MenuItem> {
        self.table.find(id)
    }

    pub fn get_all(&self) -> Vec<MenuItem> {
        self.table.all()
    }

    pub(crate) fn rows(&self) -> &[MenuItem] {
        self.table.rows()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.table.iter()
    }

    pub fn load_all(&mut self, items: Vec<MenuItem>) {
        self.table.load(items);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// `None` once `Id::MAX` has been handed out.
    pub fn next_id(&self) -> Option<Id> {
        self.table.next_id()
    }
}
