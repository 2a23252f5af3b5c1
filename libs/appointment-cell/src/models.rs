// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;

use shared_database::Record;

// ==============================================================================
// TIME INTERVALS
// ==============================================================================

/// A closed time span: both `start` and `end` belong to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Zero-length intervals are allowed; `start > end` is not.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if start > end {
            return Err(IntervalError::StartsAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the interval without checking bound order. Stored rows are
    /// compared as they are.
    pub(crate) fn from_bounds(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        crate::services::overlap::overlaps(self, other)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    #[error("interval starts at {start} after it ends at {end}")]
    StartsAfterEnd { start: DateTime<Utc>, end: DateTime<Utc> },
}

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A booking of one patient with one doctor in one room. The referenced
/// records are looked up by key and are not owned by the appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub room_name: String,
    pub starts_at: DateTime<Utc>,
    pub finishes_at: DateTime<Utc>,
}

impl Appointment {
    pub fn new(patient_id: i64, doctor_id: i64, room_name: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            id: None,
            patient_id,
            doctor_id,
            room_name: room_name.into(),
            starts_at: interval.start(),
            finishes_at: interval.end(),
        }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval::from_bounds(self.starts_at, self.finishes_at)
    }

    /// Time-only comparison; doctors and rooms are not consulted.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.interval().overlaps(&other.interval())
    }

    pub fn shares_resource_with(&self, other: &Appointment) -> bool {
        self.doctor_id == other.doctor_id || self.room_name == other.room_name
    }
}

impl Record for Appointment {
    type Key = i64;
    const TABLE: &'static str = "appointments";
    const KEY_COLUMN: &'static str = "id";

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub room_name: String,
    pub starts_at: DateTime<Utc>,
    pub finishes_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentQueryParams {
    pub doctor_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub room_name: Option<String>,
}

impl AppointmentQueryParams {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.doctor_id.map_or(true, |id| appointment.doctor_id == id)
            && self.patient_id.map_or(true, |id| appointment.patient_id == id)
            && self.room_name.as_deref().map_or(true, |name| appointment.room_name == name)
    }
}

/// Outcome of a dry-run admission check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub admissible: bool,
    pub conflicts: Vec<Appointment>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Room not found")]
    RoomNotFound,

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Appointment conflicts with {} existing booking(s)", .0.len())]
    Conflict(Vec<Appointment>),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
