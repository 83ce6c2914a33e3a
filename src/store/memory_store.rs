use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::equipment::Equipment;
use crate::domain::reservation::Reservation;
use crate::store::{EquipmentStore, NewReservation, ReservationStore, StoreError};

/// In-memory storage collaborator, seeded from a fixture.
///
/// Backs the demo binary and offline use; behaves like the REST store
/// minus the network, including id assignment on persist.
#[derive(Debug)]
pub struct MemoryStore {
    equipment: Vec<Equipment>,
    reservations: RwLock<Vec<Reservation>>,
}

impl MemoryStore {
    pub fn new(equipment: Vec<Equipment>, reservations: Vec<Reservation>) -> MemoryStore {
        MemoryStore { equipment, reservations: RwLock::new(reservations) }
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.read().expect("RwLock poisoned").len()
    }
}

#[async_trait]
impl EquipmentStore for MemoryStore {
    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        Ok(self.equipment.clone())
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        Ok(self.reservations.read().expect("RwLock poisoned").clone())
    }

    async fn persist_reservation(&self, new: NewReservation) -> Result<Reservation, StoreError> {
        let stored = Reservation {
            id: Uuid::new_v4().to_string(),
            equipment_id: new.equipment_id,
            window: new.window,
            purpose: new.purpose,
            status: new.status,
        };

        self.reservations.write().expect("RwLock poisoned").push(stored.clone());
        Ok(stored)
    }
}
