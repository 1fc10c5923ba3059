//! Debounced catalog search for typed input.
//!
//! Every submitted term cancels the pending one and schedules a new search
//! after a fixed delay, so a burst of keystrokes costs one round trip. Results
//! carry the sequence number of the submission that produced them; only the
//! latest submission may publish (last-issued-wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::entry::CatalogEntry;
use crate::listing::LocalListing;
use crate::lookup::CandidateLookup;
use crate::search::{CatalogError, CatalogSearch};

/// Delay between the last keystroke and the search.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    /// A submission is waiting out the delay or its search is in flight.
    Pending,
}

#[derive(Debug, Clone)]
pub struct SearchUpdate {
    pub seq: u64,
    pub term: String,
    pub outcome: Result<Vec<CatalogEntry>, CatalogError>,
}

pub struct DebouncedSearch<L, C> {
    search: Arc<CatalogSearch<L, C>>,
    delay: Duration,
    issued: Arc<AtomicU64>,
    completed: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    updates: Arc<watch::Sender<Option<SearchUpdate>>>,
}

impl<L, C> DebouncedSearch<L, C>
where
    L: LocalListing + 'static,
    C: CandidateLookup + 'static,
{
    pub fn new(search: Arc<CatalogSearch<L, C>>, delay: Duration) -> Self {
        let (updates, _rx) = watch::channel(None);
        Self {
            search,
            delay,
            issued: Arc::new(AtomicU64::new(0)),
            completed: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            updates: Arc::new(updates),
        }
    }

    /// Receiver for published results; holds the latest one.
    pub fn subscribe(&self) -> watch::Receiver<Option<SearchUpdate>> {
        self.updates.subscribe()
    }

    pub fn state(&self) -> DebounceState {
        if self.completed.load(Ordering::SeqCst) >= self.issued.load(Ordering::SeqCst) {
            DebounceState::Idle
        } else {
            DebounceState::Pending
        }
    }

    /// Schedule a search for `term`, superseding any pending one.
    ///
    /// Must be called from within a Tokio runtime. Returns the submission's
    /// sequence number.
    pub fn submit(&self, term: impl Into<String>) -> u64 {
        let term = term.into();
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = pending.take() {
            prev.abort();
        }

        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, term = %term, "search scheduled");

        let search = self.search.clone();
        let delay = self.delay;
        let issued = self.issued.clone();
        let completed = self.completed.clone();
        let updates = self.updates.clone();

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = search.search(&term).await;

            if issued.load(Ordering::SeqCst) != seq {
                debug!(seq, "dropping superseded search result");
                return;
            }
            completed.store(seq, Ordering::SeqCst);
            updates.send_if_modified(|slot| {
                let newer = slot.as_ref().is_none_or(|u| u.seq < seq);
                if newer {
                    *slot = Some(SearchUpdate { seq, term, outcome });
                }
                newer
            });
        }));

        seq
    }

    /// Drop the pending submission, if any, without publishing.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(prev) = pending.take() {
            prev.abort();
        }
        self.completed
            .store(self.issued.load(Ordering::SeqCst), Ordering::SeqCst);
    }
}

impl<L, C> Drop for DebouncedSearch<L, C> {
    fn drop(&mut self) {
        if let Some(task) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use medstock_inventory::InMemoryInventoryStore;

    use super::*;
    use crate::search::test_support::{store_with, StaticLookup};

    fn debounced(lookup: Arc<StaticLookup>) -> DebouncedSearch<InMemoryInventoryStore, Arc<StaticLookup>> {
        let search = CatalogSearch::new(
            store_with(&[("Paracetamol 500", "GSK"), ("Dolo 650", "Micro")]),
            lookup,
        );
        DebouncedSearch::new(Arc::new(search), DEFAULT_DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn idle_until_something_is_submitted() {
        let d = debounced(Arc::new(StaticLookup::default()));
        assert_eq!(d.state(), DebounceState::Idle);
        assert!(d.subscribe().borrow().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_keystrokes_runs_one_search() {
        let lookup = Arc::new(StaticLookup::new(vec![json!({"name": "Paracip", "manufacturer": "Cipla"})]));
        let d = debounced(lookup.clone());
        let mut rx = d.subscribe();

        d.submit("par");
        d.submit("para");
        let last = d.submit("paracetamol");
        assert_eq!(d.state(), DebounceState::Pending);

        rx.changed().await.unwrap();
        let update = rx.borrow_and_update().clone().unwrap();

        assert_eq!(update.seq, last);
        assert_eq!(update.term, "paracetamol");
        assert_eq!(update.outcome.unwrap().len(), 2);
        assert_eq!(lookup.calls(), 1);
        assert_eq!(d.state(), DebounceState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_runs_before_the_delay() {
        let lookup = Arc::new(StaticLookup::default());
        let d = debounced(lookup.clone());

        d.submit("dolo");
        tokio::time::sleep(DEFAULT_DEBOUNCE - Duration::from_millis(1)).await;
        assert_eq!(lookup.calls(), 0);
        assert_eq!(d.state(), DebounceState::Pending);

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(lookup.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_submissions_each_publish() {
        let lookup = Arc::new(StaticLookup::default());
        let d = debounced(lookup.clone());
        let mut rx = d.subscribe();

        d.submit("dolo");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().unwrap().term, "dolo");

        d.submit("paracetamol");
        rx.changed().await.unwrap();
        let update = rx.borrow_and_update().clone().unwrap();
        assert_eq!(update.term, "paracetamol");
        assert_eq!(update.seq, 2);
        assert_eq!(lookup.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_search() {
        let lookup = Arc::new(StaticLookup::default());
        let d = debounced(lookup.clone());
        let rx = d.subscribe();

        d.submit("dolo");
        d.cancel();
        assert_eq!(d.state(), DebounceState::Idle);

        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
        assert_eq!(lookup.calls(), 0);
        assert!(rx.borrow().is_none());
    }
}
