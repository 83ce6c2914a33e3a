use async_trait::async_trait;
use thiserror::Error;

use crate::domain::equipment::Equipment;
use crate::domain::reservation::{Reservation, ReservationStatus, TimeRange};

pub mod memory_store;
pub mod rest_store;

/// Failure of a storage collaborator call.
///
/// Wrapped unchanged into a scheduling rejection; the scheduler never
/// retries, retry policy belongs to the collaborator or the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Transport failure talking to the data store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Data store returned a malformed record: {0}")]
    Decode(String),

    #[error("Fixture could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// A reservation about to be persisted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub equipment_id: String,
    pub window: TimeRange,
    pub purpose: String,
    pub status: ReservationStatus,
}

/// Read access to the equipment collection.
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, StoreError>;
}

/// Read/write access to the reservation collection.
///
/// `fetch_reservations` returns reservations for all equipment; filtering
/// down to one unit happens on the scheduler side.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, StoreError>;

    /// Persists the candidate and returns the stored record, id assigned.
    async fn persist_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError>;
}
