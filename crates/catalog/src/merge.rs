//! Merge-key deduplication across the local/external boundary.

use std::collections::HashMap;

use serde_json::Value;

use medstock_inventory::MedicineRecord;

use crate::entry::{Candidate, CatalogEntry};

/// Identity used to deduplicate records from different sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MergeKey {
    /// JSON text of a non-null `id` (`1` and `"1"` stay distinct).
    Id(String),
    /// `lowercase(name) + "-" + lowercase(manufacturer)`.
    NameManufacturer(String),
}

impl MergeKey {
    pub fn name_manufacturer(name: &str, manufacturer: &str) -> Self {
        Self::NameManufacturer(format!(
            "{}-{}",
            name.to_lowercase(),
            manufacturer.to_lowercase()
        ))
    }
}

pub trait MergeKeyed {
    fn merge_key(&self) -> MergeKey;
}

impl MergeKeyed for MedicineRecord {
    fn merge_key(&self) -> MergeKey {
        MergeKey::Id(Value::from(self.id.get()).to_string())
    }
}

impl MergeKeyed for Candidate {
    fn merge_key(&self) -> MergeKey {
        match self.get("id") {
            Some(id) if !id.is_null() => MergeKey::Id(id.to_string()),
            _ => MergeKey::name_manufacturer(
                &self.text("name").unwrap_or_default(),
                &self.text("manufacturer").unwrap_or_default(),
            ),
        }
    }
}

impl MergeKeyed for CatalogEntry {
    fn merge_key(&self) -> MergeKey {
        match self {
            CatalogEntry::Local(r) => r.merge_key(),
            CatalogEntry::External(c) => c.merge_key(),
        }
    }
}

/// Merge two sequences, keeping one entry per merge key.
///
/// Behaves like an insertion-ordered map: every `primary` entry is inserted
/// (a repeated key replaces the value but keeps its first position), then
/// each `secondary` entry is added only if its key is still unseen.
pub fn merge_by_key<T>(primary: &[T], secondary: &[T]) -> Vec<T>
where
    T: MergeKeyed + Clone,
{
    let mut slots: HashMap<MergeKey, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::with_capacity(primary.len() + secondary.len());

    for item in primary {
        let key = item.merge_key();
        match slots.get(&key) {
            Some(&idx) => out[idx] = item.clone(),
            None => {
                slots.insert(key, out.len());
                out.push(item.clone());
            }
        }
    }

    for item in secondary {
        let key = item.merge_key();
        if !slots.contains_key(&key) {
            slots.insert(key, out.len());
            out.push(item.clone());
        }
    }

    out
}
