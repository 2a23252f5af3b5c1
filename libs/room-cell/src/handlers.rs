use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreateRoomRequest, RoomError};
use crate::services::RoomService;

impl From<RoomError> for AppError {
    fn from(e: RoomError) -> Self {
        match e {
            RoomError::NotFound => AppError::NotFound("Room not found".to_string()),
            RoomError::AlreadyExists(name) => AppError::Conflict(format!("Room {} already exists", name)),
            RoomError::ValidationError(msg) => AppError::ValidationError(msg),
            RoomError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

pub async fn get_all_rooms(
    State(service): State<Arc<RoomService>>,
) -> Result<Response, AppError> {
    let rooms = service.list_rooms().await?;

    if rooms.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(json!(rooms)).into_response())
}

#[axum::debug_handler]
pub async fn get_room(
    State(service): State<Arc<RoomService>>,
    Path(room_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let room = service.get_room(&room_name).await?;
    Ok(Json(json!(room)))
}

#[axum::debug_handler]
pub async fn create_room(
    State(service): State<Arc<RoomService>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let room = service.create_room(request).await?;
    Ok((StatusCode::CREATED, Json(json!(room))))
}

#[axum::debug_handler]
pub async fn delete_room(
    State(service): State<Arc<RoomService>>,
    Path(room_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    service.delete_room(&room_name).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Room {} deleted", room_name)
    })))
}

#[axum::debug_handler]
pub async fn delete_all_rooms(
    State(service): State<Arc<RoomService>>,
) -> Result<Json<Value>, AppError> {
    service.delete_all_rooms().await?;

    Ok(Json(json!({
        "success": true,
        "message": "All rooms deleted"
    })))
}
