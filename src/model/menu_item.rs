use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Id, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Id,
    pub name: String,
    #[serde(with = "super::float_repr")]
    pub price: f64,
}

impl MenuItem {
    pub fn new(id: Id, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

impl Record for MenuItem {
    fn id(&self) -> Id {
        self.id
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.price)
    }
}
