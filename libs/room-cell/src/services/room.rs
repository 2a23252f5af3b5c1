use std::sync::Arc;

use tracing::{debug, info};

use shared_database::RecordStore;

use crate::models::{CreateRoomRequest, Room, RoomError};

pub struct RoomService {
    store: Arc<dyn RecordStore<Room>>,
}

impl RoomService {
    pub fn new(store: Arc<dyn RecordStore<Room>>) -> Self {
        Self { store }
    }

    /// Rooms are keyed by name, so a second room with the same name is refused
    /// rather than silently replacing the first.
    pub async fn create_room(&self, request: CreateRoomRequest) -> Result<Room, RoomError> {
        let room_name = request.room_name.trim().to_string();
        if room_name.is_empty() {
            return Err(RoomError::ValidationError("Room name must not be blank".to_string()));
        }

        debug!("Creating room: {}", room_name);

        let existing = self.store.find_by_id(&room_name).await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))?;
        if existing.is_some() {
            return Err(RoomError::AlreadyExists(room_name));
        }

        let saved = self.store.save(Room::new(room_name)).await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))?;

        info!("Room {} created", saved.room_name);
        Ok(saved)
    }

    pub async fn get_room(&self, room_name: &str) -> Result<Room, RoomError> {
        debug!("Fetching room: {}", room_name);

        self.store.find_by_id(&room_name.to_string()).await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))?
            .ok_or(RoomError::NotFound)
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, RoomError> {
        self.store.find_all().await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))
    }

    pub async fn delete_room(&self, room_name: &str) -> Result<(), RoomError> {
        let deleted = self.store.delete(&room_name.to_string()).await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))?;

        if !deleted {
            return Err(RoomError::NotFound);
        }

        info!("Room {} deleted", room_name);
        Ok(())
    }

    pub async fn delete_all_rooms(&self) -> Result<(), RoomError> {
        self.store.delete_all().await
            .map_err(|e| RoomError::DatabaseError(e.to_string()))
    }
}
