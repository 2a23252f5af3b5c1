use axum::{body::Body, http::Response};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{json, Value};

use shared_config::{AppConfig, StorageBackend};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    /// In-memory configuration; nothing leaves the process.
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            storage_backend: StorageBackend::Memory,
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            ..AppConfig::default()
        }
    }

    /// Supabase configuration pointed at `url`, typically a wiremock server.
    pub fn to_supabase_config(&self, url: &str) -> AppConfig {
        AppConfig {
            storage_backend: StorageBackend::Supabase,
            supabase_url: url.to_string(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            ..AppConfig::default()
        }
    }
}

/// A timestamp on 2022-01-01, the day every scheduling fixture uses.
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|day| day.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

pub async fn read_json(response: Response<Body>) -> Value {
    match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        _ => Value::Null,
    }
}

pub struct TestPayloads;

impl TestPayloads {
    pub fn doctor(first_name: &str, last_name: &str, age: i32, email: &str) -> Value {
        json!({
            "first_name": first_name,
            "last_name": last_name,
            "age": age,
            "email": email
        })
    }

    pub fn patient(first_name: &str, last_name: &str, age: i32, email: &str) -> Value {
        json!({
            "first_name": first_name,
            "last_name": last_name,
            "age": age,
            "email": email
        })
    }

    pub fn room(room_name: &str) -> Value {
        json!({
            "room_name": room_name
        })
    }

    pub fn appointment(
        patient_id: i64,
        doctor_id: i64,
        room_name: &str,
        starts_at: DateTime<Utc>,
        finishes_at: DateTime<Utc>,
    ) -> Value {
        json!({
            "patient_id": patient_id,
            "doctor_id": doctor_id,
            "room_name": room_name,
            "starts_at": starts_at.to_rfc3339(),
            "finishes_at": finishes_at.to_rfc3339()
        })
    }

    /// A stored appointment row as the PostgREST backend returns it.
    pub fn appointment_row(
        id: i64,
        patient_id: i64,
        doctor_id: i64,
        room_name: &str,
        starts_at: DateTime<Utc>,
        finishes_at: DateTime<Utc>,
    ) -> Value {
        let mut row = Self::appointment(patient_id, doctor_id, room_name, starts_at, finishes_at);
        row["id"] = json!(id);
        row
    }
}
