use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use medstock_inventory::MedicineRecord;

/// Loosely-typed record returned by the external lookup API.
///
/// Display/autofill only: never validated, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(Map<String, Value>);

impl Candidate {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// `Some` only for JSON objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field rendered as text. Strings are returned as-is, numbers and
    /// booleans in their JSON form; `null`, arrays and objects are `None`.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// One row of a catalog search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Local(MedicineRecord),
    External(Candidate),
}

impl CatalogEntry {
    pub fn is_local(&self) -> bool {
        matches!(self, CatalogEntry::Local(_))
    }

    pub fn name(&self) -> Option<String> {
        match self {
            CatalogEntry::Local(r) => Some(r.name.clone()),
            CatalogEntry::External(c) => c.text("name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_become_candidates() {
        assert!(Candidate::from_value(json!({"name": "Dolo"})).is_some());
        assert!(Candidate::from_value(json!("Dolo")).is_none());
        assert!(Candidate::from_value(json!(null)).is_none());
    }

    #[test]
    fn text_renders_scalars() {
        let c = Candidate::from_value(json!({"mrp": 31.5, "name": "Dolo", "x": null})).unwrap();
        assert_eq!(c.text("mrp").as_deref(), Some("31.5"));
        assert_eq!(c.text("name").as_deref(), Some("Dolo"));
        assert_eq!(c.text("x"), None);
        assert_eq!(c.text("missing"), None);
    }

    #[test]
    fn external_entry_serializes_as_received() {
        let raw = json!({"name": "Dolo 650", "label": "strip of 15", "mrp": 30});
        let entry = CatalogEntry::External(Candidate::from_value(raw.clone()).unwrap());
        assert_eq!(serde_json::to_value(&entry).unwrap(), raw);
    }
}
