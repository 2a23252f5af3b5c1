use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, DoctorError};
use crate::services::DoctorService;

impl From<DoctorError> for AppError {
    fn from(e: DoctorError) -> Self {
        match e {
            DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
            DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
            DoctorError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

/// Lists every doctor; an empty clinic answers 204.
pub async fn get_all_doctors(
    State(service): State<Arc<DoctorService>>,
) -> Result<Response, AppError> {
    let doctors = service.list_doctors().await?;

    if doctors.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(json!(doctors)).into_response())
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(service): State<Arc<DoctorService>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let doctor = service.get_doctor(doctor_id).await?;
    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(service): State<Arc<DoctorService>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let doctor = service.create_doctor(request).await?;
    Ok((StatusCode::CREATED, Json(json!(doctor))))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(service): State<Arc<DoctorService>>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    service.delete_doctor(doctor_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Doctor {} deleted", doctor_id)
    })))
}

#[axum::debug_handler]
pub async fn delete_all_doctors(
    State(service): State<Arc<DoctorService>>,
) -> Result<Json<Value>, AppError> {
    service.delete_all_doctors().await?;

    Ok(Json(json!({
        "success": true,
        "message": "All doctors deleted"
    })))
}
