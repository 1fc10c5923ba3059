use std::sync::Arc;

use medstock_catalog::{Autocomplete, CandidateLookup, CatalogSearch, HttpCandidateLookup};
use medstock_inventory::InMemoryInventoryStore;

use crate::config::AppConfig;

pub type StoreHandle = Arc<InMemoryInventoryStore>;
pub type SharedLookup = Arc<dyn CandidateLookup>;

/// Everything the handlers need, owned by the composition root.
pub struct AppServices {
    store: StoreHandle,
    catalog: CatalogSearch<StoreHandle, SharedLookup>,
    autocomplete: Autocomplete<SharedLookup>,
}

impl AppServices {
    pub fn new(store: StoreHandle, search_lookup: SharedLookup, suggest_lookup: SharedLookup) -> Self {
        Self {
            catalog: CatalogSearch::new(store.clone(), search_lookup),
            autocomplete: Autocomplete::new(suggest_lookup),
            store,
        }
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    pub fn catalog(&self) -> &CatalogSearch<StoreHandle, SharedLookup> {
        &self.catalog
    }

    pub fn autocomplete(&self) -> &Autocomplete<SharedLookup> {
        &self.autocomplete
    }
}

/// Wire a fresh, empty store and the HTTP lookups from `config`.
pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let search_lookup =
        HttpCandidateLookup::new(config.lookup_search_url.as_str(), config.lookup_timeout)?
            .with_max_results(config.lookup_max_results);
    let suggest_lookup =
        HttpCandidateLookup::new(config.lookup_suggest_url.as_str(), config.lookup_timeout)?;

    tracing::info!(
        search_url = %config.lookup_search_url,
        suggest_url = %config.lookup_suggest_url,
        timeout_ms = config.lookup_timeout.as_millis() as u64,
        "catalog lookups configured"
    );

    Ok(AppServices::new(
        Arc::new(InMemoryInventoryStore::new()),
        Arc::new(search_lookup),
        Arc::new(suggest_lookup),
    ))
}
