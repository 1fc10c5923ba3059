//! Catalog search: local inventory filtered by name, augmented with an
//! external medicine-code lookup, deduplicated by merge key.
//!
//! - `entry`: displayable records (local or external)
//! - `merge`: merge-key deduplication
//! - `listing` / `lookup`: the two collaborators a search talks to
//! - `search`: the search policy itself
//! - `suggest`: add-form autocomplete from lookup candidates
//! - `debounce`: cancel-and-reschedule wrapper for typed input

pub mod debounce;
pub mod entry;
pub mod listing;
pub mod lookup;
pub mod merge;
pub mod search;
pub mod suggest;

pub use debounce::{DebounceState, DebouncedSearch, SearchUpdate, DEFAULT_DEBOUNCE};
pub use entry::{Candidate, CatalogEntry};
pub use listing::{HttpInventoryClient, ListingError, LocalListing};
pub use lookup::{candidates_from_payload, CandidateLookup, HttpCandidateLookup, LookupError};
pub use merge::{merge_by_key, MergeKey, MergeKeyed};
pub use search::{CatalogError, CatalogSearch, MIN_TERM_LEN};
pub use suggest::{Autocomplete, MedicineDraft, Suggestion};
