//! Inventory domain module.
//!
//! Holds the authoritative set of medicine records: validation of incoming
//! add-forms, id assignment and listing. No IO and no HTTP live here.

pub mod medicine;
pub mod store;

pub use medicine::{MedicineForm, MedicineRecord, NewMedicine, SkuType, REQUIRED_FIELDS};
pub use store::{InMemoryInventoryStore, InventoryStore, StoreError};
