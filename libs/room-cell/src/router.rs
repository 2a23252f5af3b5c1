use std::sync::Arc;
use axum::{routing::{get, post}, Router};

use crate::handlers::*;
use crate::services::RoomService;

pub fn room_routes(service: Arc<RoomService>) -> Router {
    Router::new()
        .route("/rooms", get(get_all_rooms).delete(delete_all_rooms))
        .route("/rooms/{room_name}", get(get_room).delete(delete_room))
        .route("/room", post(create_room))
        .with_state(service)
}
