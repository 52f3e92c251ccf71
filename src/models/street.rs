//! Street model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::StreetCode;

/// A street that accounts are registered on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Street {
    pub code: StreetCode,
    pub name: String,
}

impl Street {
    pub fn new(code: StreetCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Validate the street
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Street name cannot be empty".into());
        }
        Ok(())
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
