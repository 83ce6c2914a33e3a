
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use medequip_scheduler::domain::equipment::Equipment;
use medequip_scheduler::domain::preview::LivePreview;
use medequip_scheduler::domain::reservation::{Reservation, ReservationStatus};
use medequip_scheduler::domain::scheduler::{Rejection, ReservationDraft, ReservationScheduler, ValidationError};
use medequip_scheduler::store::{EquipmentStore, NewReservation, ReservationStore, StoreError};

use store_mock::{equipment, reservation, CountingStore};

fn draft(equipment_id: &str, start: &str, end: &str) -> ReservationDraft {
    ReservationDraft {
        equipment_id: equipment_id.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        purpose: "Ward rounds".to_string(),
    }
}

fn preview_over(store: Arc<CountingStore>) -> LivePreview {
    let scheduler = Arc::new(ReservationScheduler::new(store.clone(), store));
    LivePreview::new(scheduler)
}

fn booked_store() -> Arc<CountingStore> {
    Arc::new(CountingStore::new(
        vec![equipment("E1")],
        vec![reservation("r1", "E1", "2025-01-10T10:00", "2025-01-10T12:00", ReservationStatus::Confirmed)],
    ))
}

#[tokio::test(start_paused = true)]
async fn test_single_change_yields_a_result() {
    let preview = preview_over(booked_store());

    let handle = preview.input_changed(draft("E1", "2025-01-10T11:00", "2025-01-10T13:00"));

    let outcome = handle.await.expect("preview task must not panic").expect("sole change must not be discarded");
    match outcome {
        Err(Rejection::Conflict(details)) => assert_eq!(details.reservation.id, "r1"),
        other => panic!("expected a conflict preview, got {:?}", other.map(|a| a.is_available())),
    }
}

#[tokio::test(start_paused = true)]
async fn test_rapid_changes_keep_only_the_latest() {
    let store = booked_store();
    let preview = preview_over(store.clone());

    // Two keystrokes inside one debounce window.
    let stale = preview.input_changed(draft("E1", "2025-01-10T11:00", "2025-01-10T13:00"));
    let latest = preview.input_changed(draft("E1", "2025-01-10T12:00", "2025-01-10T13:00"));

    assert!(stale.await.unwrap().is_none(), "superseded change must be discarded during debounce");

    let outcome = latest.await.unwrap().expect("latest change must be applied");
    assert!(outcome.expect("valid draft").is_available(), "[12:00,13:00) only touches the boundary");

    assert_eq!(store.fetch_count(), 2, "only the surviving preview may hit the store");
}

#[tokio::test(start_paused = true)]
async fn test_invalid_draft_previews_as_validation_rejection() {
    let preview = preview_over(booked_store());

    let handle = preview.input_changed(draft("", "2025-01-10T11:00", "2025-01-10T13:00"));

    let outcome = handle.await.unwrap().expect("sole change must not be discarded");
    assert!(matches!(outcome, Err(Rejection::Validation(ValidationError::MissingEquipment))));
}

/// Storage fake whose reservation fetch blocks until the test releases it,
/// to get a preview stuck mid-check.
struct GatedStore {
    equipment: Vec<Equipment>,
    reservations: Vec<Reservation>,
    entered: Notify,
    release: Notify,
}

impl GatedStore {
    fn new() -> GatedStore {
        GatedStore {
            equipment: vec![equipment("E1")],
            reservations: vec![],
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl EquipmentStore for GatedStore {
    async fn fetch_equipment(&self) -> Result<Vec<Equipment>, StoreError> {
        Ok(self.equipment.clone())
    }
}

#[async_trait]
impl ReservationStore for GatedStore {
    async fn fetch_reservations(&self) -> Result<Vec<Reservation>, StoreError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(self.reservations.clone())
    }

    async fn persist_reservation(&self, _new: NewReservation) -> Result<Reservation, StoreError> {
        unreachable!("previews never persist")
    }
}

#[tokio::test(start_paused = true)]
async fn test_result_overtaken_while_fetching_is_discarded() {
    let store = Arc::new(GatedStore::new());
    let scheduler = Arc::new(ReservationScheduler::new(store.clone(), store.clone()));
    let preview = LivePreview::with_debounce(scheduler, Duration::from_millis(500));

    let first = preview.input_changed(draft("E1", "2025-01-10T11:00", "2025-01-10T13:00"));

    // Wait until the first check sits inside the reservation fetch.
    store.entered.notified().await;

    // A newer change arrives while the first check is suspended.
    let second = preview.input_changed(draft("E1", "2025-01-10T14:00", "2025-01-10T15:00"));

    store.release.notify_one();
    assert!(first.await.unwrap().is_none(), "a check overtaken mid-fetch must discard its result");

    store.entered.notified().await;
    store.release.notify_one();
    let outcome = second.await.unwrap().expect("latest change must be applied");
    assert!(outcome.expect("valid draft").is_available());
}
