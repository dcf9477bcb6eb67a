use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Id, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Id,
    pub name: String,
    /// Empty string means "no phone".
    #[serde(default)]
    pub phone: String,
}

impl Customer {
    pub fn new(id: Id, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }
}

impl Record for Customer {
    fn id(&self) -> Id {
        self.id
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.phone.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.phone)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_omits_empty_phone() {
        assert_eq!(Customer::new(1, "Ana", "555-1").to_string(), "Ana (555-1)");
        assert_eq!(Customer::new(2, "Bo", "").to_string(), "Bo");
    }
}
