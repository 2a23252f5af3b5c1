use std::sync::Arc;

use tracing::{debug, info};

use shared_database::RecordStore;
use shared_utils::validation::validate_person;

use crate::models::{CreatePatientRequest, Patient, PatientError};

pub struct PatientService {
    store: Arc<dyn RecordStore<Patient>>,
}

impl PatientService {
    pub fn new(store: Arc<dyn RecordStore<Patient>>) -> Self {
        Self { store }
    }

    pub async fn create_patient(
        &self,
        request: CreatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Creating new patient record for: {}", request.email);

        validate_person(&request.first_name, &request.last_name, request.age, &request.email)
            .map_err(PatientError::ValidationError)?;

        let patient = Patient {
            id: None,
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            email: request.email,
        };

        let saved = self.store.save(patient).await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        info!("Patient record created with ID: {}", saved.id.unwrap_or_default());
        Ok(saved)
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, PatientError> {
        debug!("Fetching patient record: {}", patient_id);

        let patient = self.store.find_by_id(&patient_id).await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        patient.ok_or(PatientError::NotFound)
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        self.store.find_all().await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))
    }

    pub async fn delete_patient(&self, patient_id: i64) -> Result<(), PatientError> {
        let deleted = self.store.delete(&patient_id).await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))?;

        if !deleted {
            return Err(PatientError::NotFound);
        }

        info!("Patient {} deleted", patient_id);
        Ok(())
    }

    pub async fn delete_all_patients(&self) -> Result<(), PatientError> {
        self.store.delete_all().await
            .map_err(|e| PatientError::DatabaseError(e.to_string()))
    }
}
