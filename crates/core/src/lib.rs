//! `medstock-core` — shared domain primitives.
//!
//! Pure domain types only (no HTTP, no storage, no async runtime).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::MedicineId;
