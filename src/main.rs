use std::sync::Arc;

use clap::Parser;

use medequip_scheduler::domain::scheduler::{Rejection, ReservationDraft, ReservationScheduler};
use medequip_scheduler::loader::Database;
use medequip_scheduler::logger;
use medequip_scheduler::store::memory_store::MemoryStore;
use medequip_scheduler::store::rest_store::RestStore;

/// Runs one scheduling attempt against a fixture or a live backend.
#[derive(Parser, Debug)]
#[command(name = "medequip-scheduler", about = "Equipment reservation scheduling check")]
struct Args {
    /// Path to a db.json fixture (offline mode).
    #[arg(long, conflicts_with = "base_url")]
    data: Option<String>,

    /// Base URL of the REST data store, e.g. http://localhost:3001
    #[arg(long)]
    base_url: Option<String>,

    /// Id of the equipment to book.
    #[arg(long)]
    equipment_id: String,

    /// Booking start, ISO-8601 (e.g. 2025-01-10T10:00).
    #[arg(long)]
    start: String,

    /// Booking end, ISO-8601.
    #[arg(long)]
    end: String,

    /// Purpose of the reservation.
    #[arg(long)]
    purpose: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let args = Args::parse();

    let scheduler = match (&args.data, &args.base_url) {
        (Some(path), _) => {
            log::info!("Loading fixture from '{}'...", path);
            let database = Database::load(path)?;
            let store = Arc::new(MemoryStore::new(database.equipment, database.reservations));
            ReservationScheduler::new(store.clone(), store)
        }
        (None, Some(url)) => {
            log::info!("Using REST data store at '{}'.", url);
            let store = Arc::new(RestStore::new(url.clone())?);
            ReservationScheduler::new(store.clone(), store)
        }
        (None, None) => anyhow::bail!("Either --data or --base-url must be given"),
    };

    let draft = ReservationDraft { equipment_id: args.equipment_id, start_time: args.start, end_time: args.end, purpose: args.purpose };

    match scheduler.schedule(&draft).await {
        Ok(created) => {
            log::info!("Reservation accepted with id '{}'.", created.id);
        }
        Err(Rejection::Conflict(details)) => {
            log::warn!(
                "Reservation rejected: equipment is taken from {} to {} (reservation '{}').",
                details.window.start(),
                details.window.end(),
                details.reservation.id
            );
        }
        Err(rejection) => {
            log::warn!("Reservation rejected: {}", rejection);
        }
    }

    Ok(())
}
