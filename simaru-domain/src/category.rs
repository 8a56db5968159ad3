use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ad hoc room category, created client-side and never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        Ok(Category { id, name })
    }
}
