use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The signed-in user's editable profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
    pub skills: Vec<String>,
}

impl Profile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Placeholder profile shown before any edit has been made.
    pub fn sample() -> Self {
        Profile {
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            phone: "081234567890".to_string(),
            bio: "Room administrator".to_string(),
            skills: vec!["Scheduling".to_string(), "Reporting".to_string()],
        }
    }
}
