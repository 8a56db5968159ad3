use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Room availability states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Booked,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked => "booked",
            RoomStatus::Maintenance => "maintenance",
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RoomStatus::Available)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Room {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub status: RoomStatus,
}

// Fixtures and older API responses carry `available: bool` instead of the
// enumerated `status` field, so both shapes must deserialize.
#[derive(Deserialize)]
struct RoomRepr {
    id: u64,
    name: String,
    #[serde(default)]
    description: String,
    capacity: u32,
    #[serde(default)]
    status: Option<RoomStatus>,
    #[serde(default)]
    available: Option<bool>,
}

impl<'de> Deserialize<'de> for Room {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = RoomRepr::deserialize(deserializer)?;
        let status = match (repr.status, repr.available) {
            (Some(status), _) => status,
            (None, Some(true)) => RoomStatus::Available,
            (None, Some(false)) => RoomStatus::Booked,
            (None, None) => return Err(serde::de::Error::missing_field("status")),
        };
        Ok(Room {
            id: repr.id,
            name: repr.name,
            description: repr.description,
            capacity: repr.capacity,
            status,
        })
    }
}

impl Room {
    pub fn from_draft(id: u64, draft: &RoomDraft) -> Self {
        Room {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            capacity: draft.capacity,
            status: draft.status,
        }
    }

    /// Shallow-merge draft fields into the record, keeping the id.
    pub fn apply_draft(&mut self, draft: &RoomDraft) {
        self.name = draft.name.clone();
        self.description = draft.description.clone();
        self.capacity = draft.capacity;
        self.status = draft.status;
    }

    pub fn draft(&self) -> RoomDraft {
        RoomDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            capacity: self.capacity,
            status: self.status,
        }
    }
}

/// Writable room fields, as entered in the add/edit form
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RoomDraft {
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub status: RoomStatus,
}

impl RoomDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::Required("description"));
        }
        if self.capacity == 0 {
            return Err(ValidationError::NonPositiveCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_deserializes_enumerated_status() {
        let json = r#"
            {
                "id": 1,
                "name": "Meeting Room A",
                "description": "Small meeting room",
                "capacity": 6,
                "status": "maintenance"
            }
        "#;
        let room: Room = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(room.status, RoomStatus::Maintenance);
        assert!(!room.status.is_available());
    }

    #[test]
    fn test_room_deserializes_legacy_boolean() {
        let json = r#"{ "id": 2, "name": "Room 102", "capacity": 6, "available": false }"#;
        let room: Room = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(room.status, RoomStatus::Booked);

        let json = r#"{ "id": 3, "name": "Room 103", "capacity": 8, "available": true }"#;
        let room: Room = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(room.status, RoomStatus::Available);
    }

    #[test]
    fn test_room_rejects_missing_status() {
        let json = r#"{ "id": 4, "name": "Room 104", "capacity": 10 }"#;
        let result: Result<Room, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = RoomDraft {
            name: "Room 101".to_string(),
            description: "Corner room".to_string(),
            capacity: 4,
            status: RoomStatus::Available,
        };
        assert!(draft.validate().is_ok());

        draft.capacity = 0;
        assert_eq!(draft.validate(), Err(ValidationError::NonPositiveCapacity));

        draft.capacity = 4;
        draft.name = "   ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::Required("name")));
    }

    #[test]
    fn test_apply_draft_keeps_id() {
        let mut room = Room::from_draft(
            7,
            &RoomDraft {
                name: "Room 107".to_string(),
                description: "Old description".to_string(),
                capacity: 4,
                status: RoomStatus::Available,
            },
        );

        let mut draft = room.draft();
        draft.description = "Renovated".to_string();
        draft.status = RoomStatus::Maintenance;
        room.apply_draft(&draft);

        assert_eq!(room.id, 7);
        assert_eq!(room.description, "Renovated");
        assert_eq!(room.status, RoomStatus::Maintenance);
    }
}
