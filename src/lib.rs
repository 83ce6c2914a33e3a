pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod store;

use std::sync::Arc;

use crate::domain::scheduler::ReservationScheduler;
use crate::error::Result;
use crate::loader::Database;
use crate::store::memory_store::MemoryStore;

/// Builds a scheduler over an in-memory store seeded from a `db.json`
/// fixture. Convenience entry point for offline use and the demo binary.
pub fn scheduler_from_fixture(file_path: &str) -> Result<(ReservationScheduler, Arc<MemoryStore>)> {
    let database = Database::load(file_path)?;

    let store = Arc::new(MemoryStore::new(database.equipment, database.reservations));
    let scheduler = ReservationScheduler::new(store.clone(), store.clone());

    Ok((scheduler, store))
}
