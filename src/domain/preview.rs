use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::domain::scheduler::{Availability, Rejection, ReservationDraft, ReservationScheduler};

/// Quiescence delay before a form change triggers an availability check.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounced live availability preview for the booking form.
///
/// Every call to [`input_changed`](Self::input_changed) bumps a generation
/// counter and spawns a check for that generation. The check waits out the
/// debounce delay, and its result only counts if no newer change arrived in
/// the meantime. The generation is re-read after the store round-trip as
/// well, so a check that was overtaken while suspended discards its result
/// instead of clobbering a newer one.
#[derive(Clone)]
pub struct LivePreview {
    inner: Arc<PreviewInner>,
}

struct PreviewInner {
    scheduler: Arc<ReservationScheduler>,
    generation: AtomicU64,
    debounce: Duration,
}

impl LivePreview {
    pub fn new(scheduler: Arc<ReservationScheduler>) -> LivePreview {
        LivePreview::with_debounce(scheduler, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(scheduler: Arc<ReservationScheduler>, debounce: Duration) -> LivePreview {
        LivePreview { inner: Arc::new(PreviewInner { scheduler, generation: AtomicU64::new(0), debounce }) }
    }

    /// Registers a form change and schedules a preview check for it.
    ///
    /// The handle resolves to `Some(result)` if this change is still the
    /// latest when the check completes, and to `None` if it was superseded
    /// (either during the debounce delay or while waiting on the store).
    pub fn input_changed(&self, draft: ReservationDraft) -> JoinHandle<Option<Result<Availability, Rejection>>> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            sleep(inner.debounce).await;
            if inner.generation.load(Ordering::SeqCst) != generation {
                log::debug!("Preview generation {} superseded during debounce", generation);
                return None;
            }

            let result = inner.scheduler.preview(&draft).await;

            if inner.generation.load(Ordering::SeqCst) != generation {
                log::debug!("Preview generation {} superseded while fetching, discarding result", generation);
                return None;
            }

            Some(result)
        })
    }
}
