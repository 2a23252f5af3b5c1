// libs/appointment-cell/src/services/admission.rs
use crate::models::{Appointment, AppointmentError};
use crate::services::overlap::overlaps;

/// Existing appointments that block `candidate`.
///
/// `existing_for_doctor` and `existing_for_room` are the candidate's doctor's
/// and room's bookings as read from the store. Resource scoping is checked
/// again here: an entry sharing neither the doctor nor the room never blocks,
/// whatever list it arrived in. An entry found in both lists is reported
/// once, and an entry with the candidate's own id is skipped. Results keep
/// input order, doctor list first.
pub fn find_conflicts<'a>(
    candidate: &Appointment,
    existing_for_doctor: &'a [Appointment],
    existing_for_room: &'a [Appointment],
) -> Vec<&'a Appointment> {
    let candidate_interval = candidate.interval();
    let mut conflicts: Vec<&'a Appointment> = Vec::new();

    for existing in existing_for_doctor.iter().chain(existing_for_room) {
        if candidate.id.is_some() && existing.id == candidate.id {
            continue;
        }
        if !candidate.shares_resource_with(existing) {
            continue;
        }
        if !overlaps(&candidate_interval, &existing.interval()) {
            continue;
        }
        if conflicts.iter().any(|seen| *seen == existing) {
            continue;
        }
        conflicts.push(existing);
    }

    conflicts
}

pub fn can_admit(
    candidate: &Appointment,
    existing_for_doctor: &[Appointment],
    existing_for_room: &[Appointment],
) -> bool {
    find_conflicts(candidate, existing_for_doctor, existing_for_room).is_empty()
}

/// All-or-nothing gate: a single conflict on either resource rejects the
/// candidate and reports every conflicting booking.
pub fn admit(
    candidate: &Appointment,
    existing_for_doctor: &[Appointment],
    existing_for_room: &[Appointment],
) -> Result<(), AppointmentError> {
    let conflicts = find_conflicts(candidate, existing_for_doctor, existing_for_room);

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(AppointmentError::Conflict(conflicts.into_iter().cloned().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInterval;
    use chrono::{DateTime, NaiveDate, Utc};

    const DOC_A: i64 = 1;
    const DOC_B: i64 = 2;
    const PAT_X: i64 = 10;
    const PAT_Y: i64 = 11;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
    }

    fn booking(
        id: Option<i64>,
        doctor_id: i64,
        patient_id: i64,
        room: &str,
        from: (u32, u32),
        to: (u32, u32),
    ) -> Appointment {
        let interval = TimeInterval::new(at(from.0, from.1), at(to.0, to.1)).unwrap();
        let mut appointment = Appointment::new(patient_id, doctor_id, room, interval);
        appointment.id = id;
        appointment
    }

    fn existing() -> Appointment {
        booking(Some(1), DOC_A, PAT_X, "Room101", (10, 0), (11, 0))
    }

    #[test]
    fn test_same_doctor_overlapping_time_is_rejected() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_A, PAT_Y, "Room102", (10, 30), (10, 45));

        assert!(!can_admit(&candidate, &stored, &[]));
        assert_eq!(find_conflicts(&candidate, &stored, &[]), vec![&stored[0]]);
    }

    #[test]
    fn test_same_room_overlapping_time_is_rejected() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_B, PAT_Y, "Room101", (10, 30), (10, 45));

        assert!(!can_admit(&candidate, &[], &stored));
    }

    #[test]
    fn test_no_shared_resource_is_admitted() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_B, PAT_Y, "Room102", (10, 30), (10, 45));

        // Even when a caller hands over unrelated bookings, they never block.
        assert!(can_admit(&candidate, &stored, &stored));
        assert!(admit(&candidate, &stored, &stored).is_ok());
    }

    #[test]
    fn test_same_patient_alone_does_not_block() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_B, PAT_X, "Room102", (10, 0), (11, 0));

        assert!(can_admit(&candidate, &stored, &stored));
    }

    #[test]
    fn test_back_to_back_booking_is_rejected() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_A, PAT_Y, "Room101", (11, 0), (12, 0));

        assert!(!can_admit(&candidate, &stored, &stored));
    }

    #[test]
    fn test_shared_resource_without_time_overlap_is_admitted() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_A, PAT_Y, "Room101", (12, 0), (13, 0));

        assert!(can_admit(&candidate, &stored, &stored));
    }

    #[test]
    fn test_conflict_in_both_lists_is_reported_once() {
        let stored = vec![existing()];
        let candidate = booking(None, DOC_A, PAT_Y, "Room101", (10, 30), (10, 45));

        let conflicts = find_conflicts(&candidate, &stored, &stored);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_all_conflicts_reported_in_order() {
        let by_doctor = vec![
            booking(Some(1), DOC_A, PAT_X, "Room101", (9, 0), (10, 0)),
            booking(Some(2), DOC_A, PAT_X, "Room103", (10, 15), (10, 20)),
            booking(Some(3), DOC_A, PAT_X, "Room103", (14, 0), (15, 0)),
        ];
        let by_room = vec![
            booking(Some(4), DOC_B, PAT_Y, "Room102", (10, 40), (11, 0)),
        ];
        let candidate = booking(None, DOC_A, PAT_Y, "Room102", (10, 0), (10, 45));

        let ids: Vec<Option<i64>> = find_conflicts(&candidate, &by_doctor, &by_room)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(4)]);

        match admit(&candidate, &by_doctor, &by_room) {
            Err(AppointmentError::Conflict(conflicts)) => assert_eq!(conflicts.len(), 3),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_stored_appointment_does_not_conflict_with_itself() {
        let stored = vec![existing()];
        assert!(can_admit(&stored[0], &stored, &stored));
    }

    #[test]
    fn test_empty_schedule_admits() {
        let candidate = booking(None, DOC_A, PAT_Y, "Room101", (10, 0), (11, 0));
        assert!(can_admit(&candidate, &[], &[]));
    }
}
