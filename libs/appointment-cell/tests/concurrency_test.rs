use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use assert_matches::assert_matches;
use async_trait::async_trait;
use futures::future::join_all;

use appointment_cell::models::{Appointment, AppointmentError, CreateAppointmentRequest};
use appointment_cell::services::AppointmentBookingService;
use doctor_cell::{CreateDoctorRequest, DoctorService};
use patient_cell::{CreatePatientRequest, services::PatientService};
use room_cell::{CreateRoomRequest, services::RoomService};
use shared_database::{MemoryStore, RecordStore};
use shared_utils::test_utils::at;

/// Memory store that stalls on schedule reads, widening the window between
/// reading a schedule and writing the new booking.
struct SlowReadStore {
    inner: MemoryStore<Appointment>,
    delay: Duration,
}

#[async_trait]
impl RecordStore<Appointment> for SlowReadStore {
    async fn find_by_id(&self, key: &i64) -> Result<Option<Appointment>> {
        self.inner.find_by_id(key).await
    }

    async fn find_all(&self) -> Result<Vec<Appointment>> {
        self.inner.find_all().await
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Vec<Appointment>> {
        let rows = self.inner.find_by(column, value).await?;
        tokio::time::sleep(self.delay).await;
        Ok(rows)
    }

    async fn save(&self, record: Appointment) -> Result<Appointment> {
        self.inner.save(record).await
    }

    async fn delete(&self, key: &i64) -> Result<bool> {
        self.inner.delete(key).await
    }

    async fn delete_all(&self) -> Result<()> {
        self.inner.delete_all().await
    }
}

const DOCTORS: usize = 4;
const PATIENTS: usize = 8;
const ROOMS: usize = 4;

async fn create_test_service() -> Arc<AppointmentBookingService> {
    let doctors = Arc::new(DoctorService::new(Arc::new(MemoryStore::new())));
    let patients = Arc::new(PatientService::new(Arc::new(MemoryStore::new())));
    let rooms = Arc::new(RoomService::new(Arc::new(MemoryStore::new())));

    for i in 0..DOCTORS {
        doctors.create_doctor(CreateDoctorRequest {
            first_name: format!("Doctor{}", i),
            last_name: "Test".to_string(),
            age: 45,
            email: format!("doctor{}@example.com", i),
        }).await.unwrap();
    }
    for i in 0..PATIENTS {
        patients.create_patient(CreatePatientRequest {
            first_name: format!("Patient{}", i),
            last_name: "Test".to_string(),
            age: 30,
            email: format!("patient{}@example.com", i),
        }).await.unwrap();
    }
    for i in 0..ROOMS {
        rooms.create_room(CreateRoomRequest { room_name: format!("Room10{}", i + 1) }).await.unwrap();
    }

    let appointments = Arc::new(SlowReadStore {
        inner: MemoryStore::new(),
        delay: Duration::from_millis(25),
    });

    Arc::new(AppointmentBookingService::new(appointments, doctors, patients, rooms))
}

fn request(patient_id: i64, doctor_id: i64, room: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id,
        doctor_id,
        room_name: room.to_string(),
        starts_at: at(10, 0),
        finishes_at: at(11, 0),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_same_doctor_admit_exactly_one() {
    let service = create_test_service().await;

    let handles = (1..=PATIENTS as i64).map(|patient_id| {
        let service = service.clone();
        let room = format!("Room10{}", (patient_id as usize % ROOMS) + 1);
        tokio::spawn(async move {
            service.book_appointment(request(patient_id, 1, &room)).await
        })
    });

    let results: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(admitted, 1);
    for rejected in results.iter().filter(|r| r.is_err()) {
        assert_matches!(rejected, Err(AppointmentError::Conflict(_)));
    }

    assert_eq!(service.find_appointments_by_doctor(1).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_for_same_room_admit_exactly_one() {
    let service = create_test_service().await;

    let handles = (1..=DOCTORS as i64).map(|doctor_id| {
        let service = service.clone();
        tokio::spawn(async move {
            service.book_appointment(request(doctor_id, doctor_id, "Room101")).await
        })
    });

    let admitted = join_all(handles)
        .await
        .into_iter()
        .filter(|joined| matches!(joined, Ok(Ok(_))))
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(service.find_appointments_by_room("Room101").await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_bookings_on_disjoint_resources_all_admitted() {
    let service = create_test_service().await;

    let handles = (1..=DOCTORS as i64).map(|i| {
        let service = service.clone();
        let room = format!("Room10{}", i);
        tokio::spawn(async move {
            service.book_appointment(request(i, i, &room)).await
        })
    });

    let results = join_all(handles).await;
    assert!(results.iter().all(|joined| matches!(joined, Ok(Ok(_)))));
}
