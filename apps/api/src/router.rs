use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{router::appointment_routes, AppointmentBookingService};
use doctor_cell::{router::doctor_routes, DoctorService};
use patient_cell::{create_patient_router, services::PatientService};
use room_cell::{room_routes, services::RoomService};
use shared_database::StoreFactory;

/// The services behind every cell router. The appointment service shares the
/// entity services so bookings resolve references against the same stores.
#[derive(Clone)]
pub struct ClinicServices {
    pub doctors: Arc<DoctorService>,
    pub patients: Arc<PatientService>,
    pub rooms: Arc<RoomService>,
    pub appointments: Arc<AppointmentBookingService>,
}

impl ClinicServices {
    pub fn from_factory(factory: &StoreFactory) -> Self {
        let doctors = Arc::new(DoctorService::new(factory.open()));
        let patients = Arc::new(PatientService::new(factory.open()));
        let rooms = Arc::new(RoomService::new(factory.open()));
        let appointments = Arc::new(AppointmentBookingService::new(
            factory.open(),
            doctors.clone(),
            patients.clone(),
            rooms.clone(),
        ));

        Self { doctors, patients, rooms, appointments }
    }
}

pub fn create_router(services: ClinicServices) -> Router {
    let api = doctor_routes(services.doctors)
        .merge(create_patient_router(services.patients))
        .merge(room_routes(services.rooms))
        .merge(appointment_routes(services.appointments));

    Router::new()
        .route("/", get(|| async { "Clinic scheduling API is running!" }))
        .nest("/api", api)
}
