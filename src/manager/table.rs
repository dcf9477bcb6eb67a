use anyhow::{anyhow, Result};

use crate::model::{Id, Record};

/// Rows plus the next id to hand out.
///
/// next_id is always max(id) + 1 after `load`, and only grows afterwards, so
/// ids handed out by `allocate` are unique and strictly increasing.
/// `None` means `Id::MAX` is taken and nothing is left to hand out.
#[derive(Debug, Clone)]
pub(crate) struct IdTable<T> {
    rows: Vec<T>,
    next_id: Option<Id>,
}

impl<T: Record> Default for IdTable<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl<T: Record> IdTable<T> {
    pub(crate) fn allocate(&mut self) -> Result<Id> {
        let id = self
            .next_id
            .ok_or_else(|| anyhow!("id space exhausted (id {} is taken)", Id::MAX))?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    pub(crate) fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    pub(crate) fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.rows.iter_mut().find(|r| r.id() == id)
    }

    pub(crate) fn find(&self, id: Id) -> Option<T> {
        self.rows.iter().find(|r| r.id() == id).cloned()
    }

    /// Remove the first row with `id`.
    pub(crate) fn delete(&mut self, id: Id) -> bool {
        match self.rows.iter().position(|r| r.id() == id) {
            Some(pos) => {
                self.rows.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.rows.clone()
    }

    pub(crate) fn rows(&self) -> &[T] {
        &self.rows
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub(crate) fn load(&mut self, rows: Vec<T>) {
        let max = rows.iter().map(Record::id).max().unwrap_or(0);
        self.rows = rows;
        self.next_id = max.checked_add(1);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn next_id(&self) -> Option<Id> {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Customer;

    #[test]
    fn allocation_stops_at_id_max() {
        let mut t: IdTable<Customer> = IdTable::default();
        t.load(vec![Customer::new(Id::MAX - 1, "a", "")]);
        assert_eq!(t.next_id(), Some(Id::MAX));
        assert_eq!(t.allocate().unwrap(), Id::MAX);
        assert_eq!(t.next_id(), None);
        assert!(t.allocate().is_err());
        assert!(t.allocate().is_err());

        t.load(Vec::new());
        assert_eq!(t.allocate().unwrap(), 1);
    }
}
