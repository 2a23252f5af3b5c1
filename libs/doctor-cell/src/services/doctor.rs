use std::sync::Arc;

use tracing::{debug, info};

use shared_database::RecordStore;
use shared_utils::validation::validate_person;

use crate::models::{CreateDoctorRequest, Doctor, DoctorError};

pub struct DoctorService {
    store: Arc<dyn RecordStore<Doctor>>,
}

impl DoctorService {
    pub fn new(store: Arc<dyn RecordStore<Doctor>>) -> Self {
        Self { store }
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        debug!("Creating doctor record for: {}", request.email);

        validate_person(&request.first_name, &request.last_name, request.age, &request.email)
            .map_err(DoctorError::ValidationError)?;

        let doctor = Doctor {
            id: None,
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            email: request.email,
        };

        let saved = self.store.save(doctor).await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        info!("Doctor {} created: {}", saved.id.unwrap_or_default(), saved.full_name());
        Ok(saved)
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        debug!("Fetching doctor: {}", doctor_id);

        self.store.find_by_id(&doctor_id).await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?
            .ok_or(DoctorError::NotFound)
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        self.store.find_all().await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))
    }

    pub async fn delete_doctor(&self, doctor_id: i64) -> Result<(), DoctorError> {
        let deleted = self.store.delete(&doctor_id).await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        if !deleted {
            return Err(DoctorError::NotFound);
        }

        info!("Doctor {} deleted", doctor_id);
        Ok(())
    }

    pub async fn delete_all_doctors(&self) -> Result<(), DoctorError> {
        self.store.delete_all().await
            .map_err(|e| DoctorError::DatabaseError(e.to_string()))?;

        info!("All doctors deleted");
        Ok(())
    }
}
