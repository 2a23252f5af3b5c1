// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, warn, instrument};

use doctor_cell::{DoctorError, DoctorService};
use patient_cell::{PatientError, services::PatientService};
use room_cell::{RoomError, services::RoomService};
use shared_database::RecordStore;

use crate::models::{
    Appointment, AppointmentError, AppointmentQueryParams, ConflictReport,
    CreateAppointmentRequest, TimeInterval,
};
use crate::services::admission;
use crate::services::locks::SchedulingLocks;

pub struct AppointmentBookingService {
    appointments: Arc<dyn RecordStore<Appointment>>,
    doctors: Arc<DoctorService>,
    patients: Arc<PatientService>,
    rooms: Arc<RoomService>,
    locks: SchedulingLocks,
}

impl AppointmentBookingService {
    pub fn new(
        appointments: Arc<dyn RecordStore<Appointment>>,
        doctors: Arc<DoctorService>,
        patients: Arc<PatientService>,
        rooms: Arc<RoomService>,
    ) -> Self {
        Self {
            appointments,
            doctors,
            patients,
            rooms,
            locks: SchedulingLocks::new(),
        }
    }

    /// Admit and persist a new appointment.
    ///
    /// The doctor's and room's schedules are read, checked and written while
    /// holding both resources' scheduling locks, so two concurrent requests
    /// cannot both pass the check for the same doctor or room.
    #[instrument(skip(self, request), fields(doctor_id = request.doctor_id, room = %request.room_name))]
    pub async fn book_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let candidate = self.prepare_candidate(&request).await?;

        let _guard = self.locks.acquire(vec![
            SchedulingLocks::doctor_key(candidate.doctor_id),
            SchedulingLocks::room_key(&candidate.room_name),
        ]).await;

        let by_doctor = self.find_appointments_by_doctor(candidate.doctor_id).await?;
        let by_room = self.find_appointments_by_room(&candidate.room_name).await?;

        if let Err(e) = admission::admit(&candidate, &by_doctor, &by_room) {
            if let AppointmentError::Conflict(conflicts) = &e {
                warn!("Booking rejected for doctor {} in room {} at {} - {} conflicting appointments",
                      candidate.doctor_id, candidate.room_name, candidate.interval(), conflicts.len());
            }
            return Err(e);
        }

        let saved = self.appointments.save(candidate).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("Appointment {} booked for patient {} with doctor {} in room {}",
              saved.id.unwrap_or_default(), saved.patient_id, saved.doctor_id, saved.room_name);

        Ok(saved)
    }

    /// Run the admission check without persisting anything.
    pub async fn check_conflicts(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<ConflictReport, AppointmentError> {
        let candidate = self.prepare_candidate(&request).await?;

        let by_doctor = self.find_appointments_by_doctor(candidate.doctor_id).await?;
        let by_room = self.find_appointments_by_room(&candidate.room_name).await?;

        let conflicts: Vec<Appointment> = admission::find_conflicts(&candidate, &by_doctor, &by_room)
            .into_iter()
            .cloned()
            .collect();

        debug!("Conflict check for doctor {} in room {}: {} conflicts",
               candidate.doctor_id, candidate.room_name, conflicts.len());

        Ok(ConflictReport {
            admissible: conflicts.is_empty(),
            conflicts,
        })
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        self.appointments.find_by_id(&appointment_id).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?
            .ok_or(AppointmentError::NotFound)
    }

    pub async fn list_appointments(
        &self,
        query: AppointmentQueryParams,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = if let Some(doctor_id) = query.doctor_id {
            self.find_appointments_by_doctor(doctor_id).await?
        } else if let Some(room_name) = &query.room_name {
            self.find_appointments_by_room(room_name).await?
        } else if let Some(patient_id) = query.patient_id {
            self.find_appointments_by_patient(patient_id).await?
        } else {
            self.appointments.find_all().await
                .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?
        };

        appointments.retain(|appointment| query.matches(appointment));
        Ok(appointments)
    }

    /// Cancellation removes the booking; a reschedule is a cancel followed
    /// by a new booking.
    pub async fn cancel_appointment(&self, appointment_id: i64) -> Result<(), AppointmentError> {
        let deleted = self.appointments.delete(&appointment_id).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        if !deleted {
            return Err(AppointmentError::NotFound);
        }

        info!("Appointment {} cancelled", appointment_id);
        Ok(())
    }

    pub async fn cancel_all_appointments(&self) -> Result<(), AppointmentError> {
        self.appointments.delete_all().await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))?;

        info!("All appointments cancelled");
        Ok(())
    }

    pub async fn find_appointments_by_doctor(&self, doctor_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
        self.appointments.find_by("doctor_id", &doctor_id.to_string()).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    pub async fn find_appointments_by_room(&self, room_name: &str) -> Result<Vec<Appointment>, AppointmentError> {
        self.appointments.find_by("room_name", room_name).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    pub async fn find_appointments_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
        self.appointments.find_by("patient_id", &patient_id.to_string()).await
            .map_err(|e| AppointmentError::DatabaseError(e.to_string()))
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    /// Validate the requested interval and make sure every referenced record
    /// exists before the schedule is consulted.
    async fn prepare_candidate(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let interval = TimeInterval::new(request.starts_at, request.finishes_at)
            .map_err(|e| AppointmentError::InvalidTime(e.to_string()))?;

        if interval.is_zero_length() {
            return Err(AppointmentError::InvalidTime(
                "appointment must finish after it starts".to_string(),
            ));
        }

        self.doctors.get_doctor(request.doctor_id).await
            .map_err(|e| match e {
                DoctorError::NotFound => AppointmentError::DoctorNotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        self.patients.get_patient(request.patient_id).await
            .map_err(|e| match e {
                PatientError::NotFound => AppointmentError::PatientNotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        // Room names are stored trimmed.
        let room_name = request.room_name.trim();
        self.rooms.get_room(room_name).await
            .map_err(|e| match e {
                RoomError::NotFound => AppointmentError::RoomNotFound,
                other => AppointmentError::DatabaseError(other.to_string()),
            })?;

        Ok(Appointment::new(
            request.patient_id,
            request.doctor_id,
            room_name,
            interval,
        ))
    }
}
