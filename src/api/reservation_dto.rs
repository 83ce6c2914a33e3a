use serde::{Deserialize, Serialize};

use crate::domain::reservation::ReservationStatus;
use crate::store::NewReservation;

/// Reservation record as served by the `/reservations` collection.
///
/// Timestamps stay strings here; parsing happens in the domain conversion
/// so that a malformed record is reported, not silently mangled.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: String,
    pub equipment_id: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub status: ReservationStatusDto,
}

/// Body of a `POST /reservations`; the backend assigns the id.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewReservationDto {
    pub equipment_id: String,
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub status: ReservationStatusDto,
}

impl NewReservationDto {
    pub fn from_domain(new: &NewReservation) -> NewReservationDto {
        NewReservationDto {
            equipment_id: new.equipment_id.clone(),
            start_time: new.window.start().to_rfc3339(),
            end_time: new.window.end().to_rfc3339(),
            purpose: new.purpose.clone(),
            status: new.status.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatusDto {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl From<ReservationStatusDto> for ReservationStatus {
    fn from(dto: ReservationStatusDto) -> ReservationStatus {
        match dto {
            ReservationStatusDto::Pending => ReservationStatus::Pending,
            ReservationStatusDto::Confirmed => ReservationStatus::Confirmed,
            ReservationStatusDto::Cancelled => ReservationStatus::Cancelled,
            ReservationStatusDto::Completed => ReservationStatus::Completed,
        }
    }
}

impl From<ReservationStatus> for ReservationStatusDto {
    fn from(status: ReservationStatus) -> ReservationStatusDto {
        match status {
            ReservationStatus::Pending => ReservationStatusDto::Pending,
            ReservationStatus::Confirmed => ReservationStatusDto::Confirmed,
            ReservationStatus::Cancelled => ReservationStatusDto::Cancelled,
            ReservationStatus::Completed => ReservationStatusDto::Completed,
        }
    }
}
