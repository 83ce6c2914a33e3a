use std::sync::Arc;

use thiserror::Error;

use crate::domain::reservation::{parse_timestamp, Reservation, ReservationStatus, TimeRange};
use crate::store::{EquipmentStore, NewReservation, ReservationStore, StoreError};

/// Raw booking-form input, exactly as submitted: timestamps still strings,
/// nothing trimmed or parsed yet.
#[derive(Debug, Clone, Default)]
pub struct ReservationDraft {
    pub equipment_id: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
}

/// A draft that passed validation: timestamps parsed, interval ordered,
/// required fields present.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub equipment_id: String,
    pub window: TimeRange,
    pub purpose: String,
}

/// Local validation failure. Detected without any I/O and recoverable by
/// correcting the input; never retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No equipment selected")]
    MissingEquipment,

    #[error("Start or end time is not a valid timestamp")]
    InvalidDate,

    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("Purpose must not be empty")]
    MissingPurpose,
}

/// Validates a draft, short-circuiting on the first failing rule.
///
/// Rule order is part of the contract: missing equipment is reported
/// before date problems, date problems before interval ordering, and the
/// purpose check comes last. There is no "not in the past" rule; booking
/// retroactively is allowed.
pub fn validate_candidate(draft: &ReservationDraft) -> Result<Candidate, ValidationError> {
    if draft.equipment_id.trim().is_empty() {
        return Err(ValidationError::MissingEquipment);
    }

    let start = parse_timestamp(&draft.start_time).ok_or(ValidationError::InvalidDate)?;
    let end = parse_timestamp(&draft.end_time).ok_or(ValidationError::InvalidDate)?;

    let window = TimeRange::new(start, end).ok_or(ValidationError::EndBeforeStart)?;

    let purpose = draft.purpose.trim();
    if purpose.is_empty() {
        return Err(ValidationError::MissingPurpose);
    }

    Ok(Candidate { equipment_id: draft.equipment_id.trim().to_string(), window, purpose: purpose.to_string() })
}

/// Outcome of a conflict check against the current reservation set.
#[derive(Debug, Clone)]
pub enum Availability {
    Available,
    Conflict(ConflictDetails),
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// The reservation a candidate collides with, including its occupied
/// window so the caller can display it.
#[derive(Debug, Clone)]
pub struct ConflictDetails {
    pub reservation: Reservation,
    pub window: TimeRange,
}

/// Checks a candidate against all existing reservations.
///
/// Only reservations on the candidate's equipment whose status still
/// occupies the unit are considered. Overlap is half-open: a booking
/// ending exactly when the candidate starts is not a conflict.
///
/// When several reservations conflict, the one with the earliest start is
/// reported, independent of input order.
pub fn check_availability(candidate: &Candidate, existing: &[Reservation]) -> Availability {
    let conflict = existing
        .iter()
        .filter(|r| r.equipment_id == candidate.equipment_id)
        .filter(|r| r.status.occupies_equipment())
        .filter(|r| r.window.overlaps(&candidate.window))
        .min_by_key(|r| r.window.start());

    match conflict {
        Some(reservation) => Availability::Conflict(ConflictDetails { reservation: reservation.clone(), window: reservation.window }),
        None => Availability::Available,
    }
}

/// Why a scheduling attempt was turned down.
///
/// Every rejection is an explicit value the presentation layer can branch
/// on or render verbatim; nothing is thrown and nothing is swallowed.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Equipment '{0}' does not exist")]
    UnknownEquipment(String),

    #[error("Equipment is already reserved from {} to {}", .0.window.start(), .0.window.end())]
    Conflict(ConflictDetails),

    #[error("Data store failure: {0}")]
    Storage(#[from] StoreError),
}

/// Decides whether a proposed equipment booking may be accepted.
///
/// The scheduler owns no state and caches nothing: every decision
/// refetches the equipment and reservation collections through the
/// injected stores. There is still a window between the conflict check and
/// the write in which another session may book the same slot; closing it
/// would need support from the data store and is out of scope here.
pub struct ReservationScheduler {
    equipment: Arc<dyn EquipmentStore>,
    reservations: Arc<dyn ReservationStore>,
}

impl ReservationScheduler {
    pub fn new(equipment: Arc<dyn EquipmentStore>, reservations: Arc<dyn ReservationStore>) -> ReservationScheduler {
        ReservationScheduler { equipment, reservations }
    }

    /// Validates and persists a booking.
    ///
    /// Validation runs before any collaborator is called; an invalid draft
    /// costs no I/O. The conflict check always completes before the write,
    /// and nothing is persisted on any rejection. Accepted bookings are
    /// stored as `Pending`.
    pub async fn schedule(&self, draft: &ReservationDraft) -> Result<Reservation, Rejection> {
        let candidate = validate_candidate(draft)?;

        match self.check_candidate(&candidate).await? {
            Availability::Conflict(details) => {
                log::info!(
                    "Rejecting booking on '{}': conflicts with reservation '{}' ({} - {})",
                    candidate.equipment_id,
                    details.reservation.id,
                    details.window.start(),
                    details.window.end()
                );
                return Err(Rejection::Conflict(details));
            }
            Availability::Available => {}
        }

        let new = NewReservation {
            equipment_id: candidate.equipment_id.clone(),
            window: candidate.window,
            purpose: candidate.purpose.clone(),
            status: ReservationStatus::Pending,
        };

        let created = self.reservations.persist_reservation(new).await?;
        log::info!("Accepted booking '{}' on '{}' ({} - {})", created.id, created.equipment_id, created.window.start(), created.window.end());

        Ok(created)
    }

    /// The read-only half of [`schedule`](Self::schedule): validate, fetch
    /// and conflict-check without persisting. Backs the live form preview.
    pub async fn preview(&self, draft: &ReservationDraft) -> Result<Availability, Rejection> {
        let candidate = validate_candidate(draft)?;
        self.check_candidate(&candidate).await
    }

    async fn check_candidate(&self, candidate: &Candidate) -> Result<Availability, Rejection> {
        let equipment = self.equipment.fetch_equipment().await?;
        if !equipment.iter().any(|e| e.id == candidate.equipment_id) {
            return Err(Rejection::UnknownEquipment(candidate.equipment_id.clone()));
        }

        let existing = self.reservations.fetch_reservations().await?;
        Ok(check_availability(candidate, &existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> TimeRange {
        TimeRange::new(parse_timestamp(start).unwrap(), parse_timestamp(end).unwrap()).unwrap()
    }

    fn reservation(id: &str, equipment_id: &str, start: &str, end: &str, status: ReservationStatus) -> Reservation {
        Reservation {
            id: id.to_string(),
            equipment_id: equipment_id.to_string(),
            window: window(start, end),
            purpose: "Ward rounds".to_string(),
            status,
        }
    }

    fn candidate(equipment_id: &str, start: &str, end: &str) -> Candidate {
        Candidate { equipment_id: equipment_id.to_string(), window: window(start, end), purpose: "Ward rounds".to_string() }
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            ("2025-01-10T10:00", "2025-01-10T11:00", "2025-01-10T10:30", "2025-01-10T12:00"),
            ("2025-01-10T10:00", "2025-01-10T11:00", "2025-01-10T11:00", "2025-01-10T12:00"),
            ("2025-01-10T10:00", "2025-01-10T14:00", "2025-01-10T11:00", "2025-01-10T12:00"),
            ("2025-01-10T10:00", "2025-01-10T11:00", "2025-01-12T10:00", "2025-01-12T11:00"),
        ];

        for (s1, e1, s2, e2) in cases {
            let a = window(s1, e1);
            let b = window(s2, e2);
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "overlaps({s1}-{e1}, {s2}-{e2}) must be symmetric");
        }
    }

    #[test]
    fn test_boundary_touch_is_not_a_conflict() {
        let a = window("2025-01-10T10:00", "2025-01-10T11:00");
        let b = window("2025-01-10T11:00", "2025-01-10T12:00");
        assert!(!a.overlaps(&b), "[10:00,11:00) and [11:00,12:00) touch but do not overlap");

        let c = window("2025-01-10T10:59", "2025-01-10T12:00");
        assert!(a.overlaps(&c), "one minute of shared time is a conflict");
    }

    #[test]
    fn test_inactive_statuses_never_conflict() {
        let existing = vec![
            reservation("r1", "E1", "2025-01-10T10:00", "2025-01-10T12:00", ReservationStatus::Cancelled),
            reservation("r2", "E1", "2025-01-10T10:00", "2025-01-10T12:00", ReservationStatus::Completed),
        ];

        let result = check_availability(&candidate("E1", "2025-01-10T10:00", "2025-01-10T12:00"), &existing);

        assert!(result.is_available(), "cancelled/completed reservations no longer occupy the equipment");
    }

    #[test]
    fn test_other_equipment_never_conflicts() {
        let existing = vec![reservation("r1", "E1", "2025-01-10T10:00", "2025-01-10T12:00", ReservationStatus::Confirmed)];

        let result = check_availability(&candidate("E2", "2025-01-10T10:00", "2025-01-10T12:00"), &existing);

        assert!(result.is_available());
    }

    #[test]
    fn test_earliest_conflict_wins() {
        // Input order deliberately reversed: r_late before r_early.
        let existing = vec![
            reservation("r_late", "E1", "2025-01-10T12:00", "2025-01-10T14:00", ReservationStatus::Pending),
            reservation("r_early", "E1", "2025-01-10T09:00", "2025-01-10T11:00", ReservationStatus::Confirmed),
        ];

        let result = check_availability(&candidate("E1", "2025-01-10T10:00", "2025-01-10T13:00"), &existing);

        match result {
            Availability::Conflict(details) => assert_eq!(details.reservation.id, "r_early"),
            Availability::Available => panic!("expected a conflict"),
        }
    }

    #[test]
    fn test_validation_rule_order() {
        let draft = ReservationDraft {
            equipment_id: "".to_string(),
            start_time: "2025-01-10T12:00".to_string(),
            end_time: "2025-01-10T10:00".to_string(),
            purpose: "".to_string(),
        };

        // Three rules are violated at once; the first one must win.
        assert_eq!(validate_candidate(&draft), Err(ValidationError::MissingEquipment));
    }

    #[test]
    fn test_validation_rejects_unparsable_dates() {
        let draft = ReservationDraft {
            equipment_id: "E1".to_string(),
            start_time: "tomorrow-ish".to_string(),
            end_time: "2025-01-10T10:00".to_string(),
            purpose: "Ward rounds".to_string(),
        };

        assert_eq!(validate_candidate(&draft), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_validation_rejects_inverted_and_empty_intervals() {
        let mut draft = ReservationDraft {
            equipment_id: "E1".to_string(),
            start_time: "2025-01-10T12:00".to_string(),
            end_time: "2025-01-10T10:00".to_string(),
            purpose: "Ward rounds".to_string(),
        };
        assert_eq!(validate_candidate(&draft), Err(ValidationError::EndBeforeStart));

        draft.end_time = draft.start_time.clone();
        assert_eq!(validate_candidate(&draft), Err(ValidationError::EndBeforeStart));
    }

    #[test]
    fn test_validation_rejects_blank_purpose() {
        let draft = ReservationDraft {
            equipment_id: "E1".to_string(),
            start_time: "2025-01-10T10:00".to_string(),
            end_time: "2025-01-10T12:00".to_string(),
            purpose: "   ".to_string(),
        };

        assert_eq!(validate_candidate(&draft), Err(ValidationError::MissingPurpose));
    }

    #[test]
    fn test_validation_trims_accepted_fields() {
        let draft = ReservationDraft {
            equipment_id: " E1 ".to_string(),
            start_time: "2025-01-10T10:00".to_string(),
            end_time: "2025-01-10T12:00".to_string(),
            purpose: " Ward rounds ".to_string(),
        };

        let candidate = validate_candidate(&draft).unwrap();
        assert_eq!(candidate.equipment_id, "E1");
        assert_eq!(candidate.purpose, "Ward rounds");
    }
}
