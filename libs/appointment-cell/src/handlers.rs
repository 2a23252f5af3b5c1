// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{AppointmentError, AppointmentQueryParams, CreateAppointmentRequest};
use crate::services::booking::AppointmentBookingService;

fn appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::PatientNotFound => AppError::NotFound("Patient not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::RoomNotFound => AppError::NotFound("Room not found".to_string()),
        AppointmentError::InvalidTime(msg) => AppError::BadRequest(msg),
        AppointmentError::Conflict(conflicts) => AppError::ConflictWith {
            message: "Appointment slot conflicts with existing booking".to_string(),
            conflicts: json!(conflicts),
        },
        AppointmentError::DatabaseError(msg) => AppError::Database(msg),
    }
}

/// Admission-controlled booking: 201 with the stored appointment, or 409
/// listing the bookings it clashes with.
#[axum::debug_handler]
pub async fn book_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let appointment = service.book_appointment(request)
        .await
        .map_err(appointment_error)?;

    Ok((StatusCode::CREATED, Json(json!(appointment))))
}

#[axum::debug_handler]
pub async fn check_appointment_conflicts(
    State(service): State<Arc<AppointmentBookingService>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let report = service.check_conflicts(request)
        .await
        .map_err(appointment_error)?;

    Ok(Json(json!(report)))
}

pub async fn get_all_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
    Query(query): Query<AppointmentQueryParams>,
) -> Result<Response, AppError> {
    let appointments = service.list_appointments(query)
        .await
        .map_err(appointment_error)?;

    if appointments.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(json!(appointments)).into_response())
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(appointment_id)
        .await
        .map_err(appointment_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(service): State<Arc<AppointmentBookingService>>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    service.cancel_appointment(appointment_id)
        .await
        .map_err(appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Appointment {} cancelled", appointment_id)
    })))
}

#[axum::debug_handler]
pub async fn cancel_all_appointments(
    State(service): State<Arc<AppointmentBookingService>>,
) -> Result<Json<Value>, AppError> {
    service.cancel_all_appointments()
        .await
        .map_err(appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "All appointments cancelled"
    })))
}
