use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::api::reservation_dto::ReservationDto;
use crate::error::{Error, Result};

/// Lifecycle state of an equipment reservation.
///
/// A reservation is created as `Pending`. It is moved to `Confirmed` or
/// `Cancelled` by an explicit user action. `Completed` is likewise set
/// manually; the system never derives it from time elapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Whether a reservation in this state occupies its equipment.
    ///
    /// Only `Pending` and `Confirmed` reservations block other bookings;
    /// cancelled and completed ones no longer hold the time slot.
    pub fn occupies_equipment(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// A half-open time interval `[start, end)`.
///
/// The start instant is included, the end instant excluded, so that a
/// booking ending at 11:00 and another starting at 11:00 do not collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Builds a range, rejecting empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<TimeRange> {
        if end > start {
            Some(TimeRange { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test: `[s1,e1)` and `[s2,e2)` overlap iff
    /// `s1 < e2 && e1 > s2`. Symmetric in its arguments.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A persisted equipment reservation as returned by the data store.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub equipment_id: String,
    pub window: TimeRange,
    pub purpose: String,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Builds a domain reservation from its wire representation.
    ///
    /// # Errors
    /// Returns `Error::ModelConstructionError` if a timestamp does not
    /// parse or the interval is empty/inverted.
    pub fn from_dto(dto: ReservationDto) -> Result<Reservation> {
        let start = parse_timestamp(&dto.start_time)
            .ok_or_else(|| Error::ModelConstructionError(format!("Reservation '{}': unparsable startTime '{}'", dto.id, dto.start_time)))?;
        let end = parse_timestamp(&dto.end_time)
            .ok_or_else(|| Error::ModelConstructionError(format!("Reservation '{}': unparsable endTime '{}'", dto.id, dto.end_time)))?;

        let window = TimeRange::new(start, end)
            .ok_or_else(|| Error::ModelConstructionError(format!("Reservation '{}': endTime must lie after startTime", dto.id)))?;

        Ok(Reservation { id: dto.id, equipment_id: dto.equipment_id, window, purpose: dto.purpose, status: dto.status.into() })
    }
}

/// Parses a timestamp as it crosses the REST boundary.
///
/// Accepts full ISO-8601/RFC 3339 (`2025-01-10T10:00:00Z`, with offset) as
/// produced by the backend, and the zone-less `datetime-local` form
/// (`2025-01-10T10:00`) as typed into the booking form; the latter is read
/// as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Reservations starting strictly after `now`, earliest first.
pub fn upcoming(reservations: &[Reservation], now: DateTime<Utc>) -> Vec<&Reservation> {
    let mut result: Vec<&Reservation> = reservations.iter().filter(|r| r.window.start() > now).collect();
    result.sort_by_key(|r| r.window.start());
    result
}

/// Reservations whose start falls on the given calendar day (UTC).
pub fn on_day(reservations: &[Reservation], day: NaiveDate) -> Vec<&Reservation> {
    reservations.iter().filter(|r| r.window.start().date_naive() == day).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).expect("test timestamp must parse")
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-01-10T10:00:00Z").is_some());
        assert!(parse_timestamp("2025-01-10T10:00:00+01:00").is_some());
        assert!(parse_timestamp("2025-01-10T10:00").is_some());
        assert!(parse_timestamp("10.01.2025 10:00").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_time_range_rejects_inverted_interval() {
        assert!(TimeRange::new(ts("2025-01-10T11:00"), ts("2025-01-10T10:00")).is_none());
        assert!(TimeRange::new(ts("2025-01-10T10:00"), ts("2025-01-10T10:00")).is_none());
    }

    #[test]
    fn test_upcoming_sorted_by_start() {
        let dtos = [("r1", "2025-01-12T10:00"), ("r2", "2025-01-11T10:00"), ("r3", "2025-01-01T10:00")];
        let reservations: Vec<Reservation> = dtos
            .iter()
            .map(|(id, start)| Reservation {
                id: id.to_string(),
                equipment_id: "E1".to_string(),
                window: TimeRange::new(ts(start), ts("2025-01-20T10:00")).unwrap(),
                purpose: "Checkup".to_string(),
                status: ReservationStatus::Pending,
            })
            .collect();

        let result = upcoming(&reservations, ts("2025-01-10T00:00"));
        let ids: Vec<&str> = result.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["r2", "r1"], "past reservations are dropped, rest sorted by start");
    }
}
