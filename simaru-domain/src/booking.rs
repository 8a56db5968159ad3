use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A room booking. The API speaks camelCase (`roomId`, `bookingDate`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: u64,
    pub room_id: u64,
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    pub fn from_draft(id: u64, draft: &BookingDraft) -> Option<Self> {
        Some(Booking {
            id,
            room_id: draft.room_id?,
            booking_date: draft.booking_date?,
            user: draft.user.clone(),
            status: BookingStatus::Pending,
        })
    }

    pub fn apply_draft(&mut self, draft: &BookingDraft) {
        if let Some(room_id) = draft.room_id {
            self.room_id = room_id;
        }
        if let Some(date) = draft.booking_date {
            self.booking_date = date;
        }
        if !draft.user.is_empty() {
            self.user = draft.user.clone();
        }
    }

    pub fn draft(&self) -> BookingDraft {
        BookingDraft {
            room_id: Some(self.room_id),
            booking_date: Some(self.booking_date),
            user: self.user.clone(),
        }
    }
}

/// Booking form state; both fields start unset
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub room_id: Option<u64>,
    pub booking_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
}

impl BookingDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_id.is_none() {
            return Err(ValidationError::MissingRoom);
        }
        if self.booking_date.is_none() {
            return Err(ValidationError::Required("bookingDate"));
        }
        Ok(())
    }
}
