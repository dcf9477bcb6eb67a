use anyhow::Result;

use crate::model::{Customer, Id};

use super::table::IdTable;

#[derive(Debug, Clone, Default)]
pub struct CustomerManager {
    table: IdTable<Customer>,
}

impl CustomerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails only when the id space is used up.
    pub fn add(&mut self, name: impl Into<String>, phone: impl Into<String>) -> Result<Customer> {
        let c = Customer::new(self.table.allocate()?, name, phone);
        self.table.push(c.clone());
        Ok(c)
    }

    /// Replace name and phone of customer `id`.
    pub fn update(&mut self, id: Id, name: impl Into<String>, phone: impl Into<String>) -> bool {
        match self.table.get_mut(id) {
            Some(c) => {
                c.name = name.into();
                c.phone = phone.into();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: Id) -> bool {
        self.table.delete(id)
    }

    pub fn find_by_id(&self, id: Id) -> Option<Customer> {
        self.table.find(id)
    }

    pub fn get_all(&self) -> Vec<Customer> {
        self.table.all()
    }

    pub(crate) fn rows(&self) -> &[Customer] {
        self.table.rows()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.table.iter()
    }

    pub fn load_all(&mut self, customers: Vec<Customer>) {
        self.table.load(customers);
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
