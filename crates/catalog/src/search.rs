use thiserror::Error;
use tracing::{debug, warn};

use crate::entry::CatalogEntry;
use crate::listing::LocalListing;
use crate::lookup::CandidateLookup;
use crate::merge::merge_by_key;

/// Terms shorter than this (in characters, as typed) get the default
/// view: the whole inventory, no external lookup.
pub const MIN_TERM_LEN: usize = 3;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The local inventory could not be listed. This is the only failure a
    /// search reports; lookup failures degrade to local-only results.
    #[error("inventory listing unavailable: {0}")]
    ListingUnavailable(String),
}

pub(crate) fn is_searchable(term: &str) -> bool {
    term.chars().count() >= MIN_TERM_LEN
}

/// Local inventory + external lookup, merged with local precedence.
#[derive(Debug)]
pub struct CatalogSearch<L, C> {
    listing: L,
    lookup: C,
}

impl<L, C> CatalogSearch<L, C>
where
    L: LocalListing,
    C: CandidateLookup,
{
    pub fn new(listing: L, lookup: C) -> Self {
        Self { listing, lookup }
    }

    /// Search the catalog for `term`.
    ///
    /// Short terms return the full listing unfiltered. Otherwise local
    /// records whose name contains the term (case-insensitive) come first,
    /// followed by lookup candidates not already represented.
    pub async fn search(&self, term: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
        let records = self.listing.list().await.map_err(|e| {
            warn!(error = %e, "inventory listing failed");
            CatalogError::ListingUnavailable(e.to_string())
        })?;

        if !is_searchable(term) {
            return Ok(records.into_iter().map(CatalogEntry::Local).collect());
        }

        let needle = term.to_lowercase();
        let local: Vec<CatalogEntry> = records
            .into_iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .map(CatalogEntry::Local)
            .collect();

        let external: Vec<CatalogEntry> = match self.lookup.search(term).await {
            Ok(candidates) => candidates.into_iter().map(CatalogEntry::External).collect(),
            Err(e) => {
                warn!(error = %e, term, "lookup failed; returning local results only");
                Vec::new()
            }
        };

        let merged = merge_by_key(&local, &external);
        debug!(
            term,
            local = local.len(),
            external = external.len(),
            merged = merged.len(),
            "catalog search"
        );
        Ok(merged)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::Value;

    use medstock_inventory::{InMemoryInventoryStore, InventoryStore, MedicineForm, MedicineRecord};

    use crate::entry::Candidate;
    use crate::listing::{ListingError, LocalListing};
    use crate::lookup::{CandidateLookup, LookupError};

    pub fn form(name: &str, manufacturer: &str) -> MedicineForm {
        MedicineForm::new()
            .with("name", name)
            .with("manufacturer", manufacturer)
            .with("skuType", "allopathy")
            .with("skuLabel", "strip of 10")
            .with("quantity", "10")
            .with("price", "12.5")
    }

    pub fn store_with(names: &[(&str, &str)]) -> InMemoryInventoryStore {
        let store = InMemoryInventoryStore::new();
        for (name, manufacturer) in names {
            store.insert(&form(name, manufacturer)).unwrap();
        }
        store
    }

    /// Returns fixed candidates and counts calls.
    #[derive(Debug, Default)]
    pub struct StaticLookup {
        pub candidates: Vec<Candidate>,
        pub calls: AtomicUsize,
    }

    impl StaticLookup {
        pub fn new(items: Vec<Value>) -> Self {
            Self {
                candidates: items.into_iter().filter_map(Candidate::from_value).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CandidateLookup for StaticLookup {
        async fn search(&self, _term: &str) -> Result<Vec<Candidate>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }
    }

    #[derive(Debug, Default)]
    pub struct FailingLookup;

    #[async_trait]
    impl CandidateLookup for FailingLookup {
        async fn search(&self, _term: &str) -> Result<Vec<Candidate>, LookupError> {
            Err(LookupError::Status(503))
        }
    }

    #[derive(Debug, Default)]
    pub struct DownListing;

    #[async_trait]
    impl LocalListing for DownListing {
        async fn list(&self) -> Result<Vec<MedicineRecord>, ListingError> {
            Err(ListingError::Status(502))
        }
    }
}
