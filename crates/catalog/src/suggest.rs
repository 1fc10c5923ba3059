//! Add-form autocomplete from lookup candidates.

use serde::Serialize;
use tracing::warn;

use medstock_inventory::{MedicineForm, SkuType};

use crate::entry::Candidate;
use crate::lookup::CandidateLookup;
use crate::search::is_searchable;

/// Add-form values prefilled from a candidate. Everything stays text; the
/// inventory store validates on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    pub manufacturer: String,
    pub sku_type: String,
    pub sku_label: String,
    pub composition: String,
    pub quantity: String,
    pub price: String,
}

impl MedicineDraft {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let field = |name: &str| candidate.text(name).filter(|v| !v.is_empty());

        // Lookup names look like "Dolo 650 Tablet | Paracetamol 650mg".
        let name = field("name")
            .map(|n| n.split('|').next().unwrap_or_default().trim().to_string())
            .unwrap_or_default();

        Self {
            name,
            manufacturer: field("manufacturer").unwrap_or_default(),
            sku_type: field("type").unwrap_or_else(|| SkuType::default().to_string()),
            sku_label: field("label").unwrap_or_default(),
            composition: String::new(),
            quantity: field("quantity").unwrap_or_default(),
            price: field("mrp").or_else(|| field("price")).unwrap_or_default(),
        }
    }

    /// The draft as a submittable add-form.
    pub fn to_form(&self) -> MedicineForm {
        MedicineForm::new()
            .with("name", self.name.as_str())
            .with("manufacturer", self.manufacturer.as_str())
            .with("skuType", self.sku_type.as_str())
            .with("skuLabel", self.sku_label.as_str())
            .with("composition", self.composition.as_str())
            .with("quantity", self.quantity.as_str())
            .with("price", self.price.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub candidate: Candidate,
    pub draft: MedicineDraft,
}

/// Suggests medicines while the user types a name.
#[derive(Debug)]
pub struct Autocomplete<C> {
    lookup: C,
}

impl<C> Autocomplete<C>
where
    C: CandidateLookup,
{
    pub fn new(lookup: C) -> Self {
        Self { lookup }
    }

    /// Suggestions for `term`; empty for short terms or when the lookup fails.
    pub async fn suggest(&self, term: &str) -> Vec<Suggestion> {
        if !is_searchable(term) {
            return Vec::new();
        }

        match self.lookup.search(term).await {
            Ok(candidates) => candidates
                .into_iter()
                .map(|candidate| Suggestion {
                    draft: MedicineDraft::from_candidate(&candidate),
                    candidate,
                })
                .collect(),
            Err(e) => {
                warn!(error = %e, term, "suggestion lookup failed");
                Vec::new()
            }
        }
    }
}
