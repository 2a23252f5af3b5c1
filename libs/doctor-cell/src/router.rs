use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::DoctorService;

pub fn doctor_routes(service: Arc<DoctorService>) -> Router {
    Router::new()
        .route("/doctors", get(handlers::get_all_doctors).delete(handlers::delete_all_doctors))
        .route("/doctors/{id}", get(handlers::get_doctor).delete(handlers::delete_doctor))
        .route("/doctor", post(handlers::create_doctor))
        .with_state(service)
}
