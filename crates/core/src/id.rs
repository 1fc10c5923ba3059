//! Strongly-typed identifiers used across the domain.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored medicine.
///
/// Positive and assigned by the inventory store; never reused. Deserializing
/// goes through [`MedicineId::new`], so `0` is rejected on the way in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub struct MedicineId(u64);

impl MedicineId {
    /// The id handed out by an empty store.
    pub const FIRST: MedicineId = MedicineId(1);

    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::invalid_id("MedicineId: must be positive"));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<MedicineId> for u64 {
    fn from(value: MedicineId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for MedicineId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
