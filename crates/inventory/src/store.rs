use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::info;

use medstock_core::{DomainError, MedicineId};

use crate::medicine::{MedicineForm, MedicineRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The submitted form was rejected; the store is unchanged.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// A writer panicked while holding the lock.
    #[error("inventory store lock poisoned")]
    Poisoned,
}

/// Authoritative medicine inventory.
pub trait InventoryStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Result<Vec<MedicineRecord>, StoreError>;

    /// Validate `form`, assign the next id and append the record.
    fn insert(&self, form: &MedicineForm) -> Result<MedicineRecord, StoreError>;
}

impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    fn list(&self) -> Result<Vec<MedicineRecord>, StoreError> {
        (**self).list()
    }

    fn insert(&self, form: &MedicineForm) -> Result<MedicineRecord, StoreError> {
        (**self).insert(form)
    }
}

/// Process-memory store; contents are lost on restart.
///
/// A single lock covers both listing and id assignment, so concurrent inserts
/// never hand out the same id.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    records: RwLock<Vec<MedicineRecord>>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for InMemoryInventoryStore {
    fn list(&self) -> Result<Vec<MedicineRecord>, StoreError> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn insert(&self, form: &MedicineForm) -> Result<MedicineRecord, StoreError> {
        let medicine = form.validate()?;

        let mut records = self.records.write().map_err(|_| StoreError::Poisoned)?;
        let id = records
            .iter()
            .map(|r| r.id)
            .max()
            .map(|max| max.next())
            .unwrap_or(MedicineId::FIRST);

        let record = medicine.into_record(id);
        records.push(record.clone());

        info!(
            medicine_id = %record.id,
            name = %record.name,
            sku_type = %record.sku_type,
            "medicine added"
        );
        Ok(record)
    }
}
