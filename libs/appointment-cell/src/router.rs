// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::services::booking::AppointmentBookingService;

pub fn appointment_routes(service: Arc<AppointmentBookingService>) -> Router {
    Router::new()
        .route("/appointment", post(handlers::book_appointment))
        .route("/appointment/check", post(handlers::check_appointment_conflicts))
        .route("/appointments", get(handlers::get_all_appointments).delete(handlers::cancel_all_appointments))
        .route("/appointments/{appointment_id}", get(handlers::get_appointment).delete(handlers::cancel_appointment))
        .with_state(service)
}
