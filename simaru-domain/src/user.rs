use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An account visible in the user administration table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn from_draft(id: u64, draft: &UserDraft) -> Self {
        User {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
        }
    }

    pub fn apply_draft(&mut self, draft: &UserDraft) {
        self.name = draft.name.clone();
        self.email = draft.email.clone();
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// The identity returned by the auth endpoint and kept in the session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: u64,
    pub name: String,
    pub email: String,
}
