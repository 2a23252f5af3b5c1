use serde::{Deserialize, Serialize};

use shared_database::Record;

/// A consulting room, identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub room_name: String,
}

impl Room {
    pub fn new(room_name: impl Into<String>) -> Self {
        Self { room_name: room_name.into() }
    }
}

impl Record for Room {
    type Key = String;
    const TABLE: &'static str = "rooms";
    const KEY_COLUMN: &'static str = "room_name";

    fn key(&self) -> Option<String> {
        Some(self.room_name.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum RoomError {
    #[error("Room not found")]
    NotFound,

    #[error("Room {0} already exists")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
