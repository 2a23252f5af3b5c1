use std::sync::Arc;
use axum::{routing::{get, post}, Router};

use crate::handlers::*;
use crate::services::PatientService;

pub fn create_patient_router(service: Arc<PatientService>) -> Router {
    Router::new()
        .route("/patients", get(get_all_patients).delete(delete_all_patients))
        .route("/patients/{id}", get(get_patient).delete(delete_patient))
        .route("/patient", post(create_patient))
        .with_state(service)
}
