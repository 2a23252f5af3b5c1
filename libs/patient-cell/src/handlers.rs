use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, PatientError};
use crate::services::PatientService;

fn patient_error(e: PatientError) -> AppError {
    match e {
        PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
        PatientError::ValidationError(msg) => AppError::ValidationError(msg),
        PatientError::DatabaseError(msg) => AppError::Database(msg),
    }
}

pub async fn get_all_patients(
    State(service): State<Arc<PatientService>>,
) -> Result<Response, AppError> {
    let patients = service.list_patients()
        .await
        .map_err(patient_error)?;

    if patients.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    Ok(Json(json!(patients)).into_response())
}

#[axum::debug_handler]
pub async fn get_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let patient = service.get_patient(patient_id)
        .await
        .map_err(patient_error)?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(service): State<Arc<PatientService>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let patient = service.create_patient(request)
        .await
        .map_err(patient_error)?;

    Ok((StatusCode::CREATED, Json(json!(patient))))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(service): State<Arc<PatientService>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    service.delete_patient(patient_id)
        .await
        .map_err(patient_error)?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Patient {} deleted", patient_id)
    })))
}

#[axum::debug_handler]
pub async fn delete_all_patients(
    State(service): State<Arc<PatientService>>,
) -> Result<Json<Value>, AppError> {
    service.delete_all_patients()
        .await
        .map_err(patient_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "All patients deleted"
    })))
}
