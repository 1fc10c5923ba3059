use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use medstock_core::{DomainError, DomainResult, MedicineId};

/// Fields that must be present and non-blank on every add, in the order they
/// are checked.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "manufacturer",
    "skuType",
    "skuLabel",
    "quantity",
    "price",
];

/// Kind of SKU a medicine is sold as.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkuType {
    #[default]
    Allopathy,
    Otc,
    Fmcg,
}

impl SkuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkuType::Allopathy => "allopathy",
            SkuType::Otc => "otc",
            SkuType::Fmcg => "fmcg",
        }
    }
}

impl core::fmt::Display for SkuType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkuType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allopathy" => Ok(SkuType::Allopathy),
            "otc" => Ok(SkuType::Otc),
            "fmcg" => Ok(SkuType::Fmcg),
            _ => Err(DomainError::InvalidSkuType(s.to_string())),
        }
    }
}

/// A stored medicine. Created only by the inventory store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineRecord {
    pub id: MedicineId,
    pub name: String,
    pub manufacturer: String,
    pub sku_type: SkuType,
    pub sku_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    pub quantity: u64,
    pub price: f64,
}

/// A validated medicine that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub manufacturer: String,
    pub sku_type: SkuType,
    pub sku_label: String,
    pub composition: Option<String>,
    pub quantity: u64,
    pub price: f64,
}

impl NewMedicine {
    pub fn into_record(self, id: MedicineId) -> MedicineRecord {
        MedicineRecord {
            id,
            name: self.name,
            manufacturer: self.manufacturer,
            sku_type: self.sku_type,
            sku_label: self.sku_label,
            composition: self.composition,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// Untyped add-form: field name -> submitted text.
///
/// This is what arrives over the wire before any validation happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineForm {
    fields: HashMap<String, String>,
}

impl MedicineForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field; a repeated field keeps the last value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// The trimmed value of `field`, or `None` when absent or blank.
    fn present(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    fn required(&self, field: &'static str) -> DomainResult<&str> {
        self.present(field).ok_or(DomainError::missing(field))
    }

    /// Validate and coerce the form into a [`NewMedicine`].
    ///
    /// Presence is checked first, in [`REQUIRED_FIELDS`] order, so the error
    /// always names the first missing field. Numbers are coerced next.
    pub fn validate(&self) -> DomainResult<NewMedicine> {
        for field in REQUIRED_FIELDS {
            self.required(field)?;
        }

        let quantity = parse_quantity(self.required("quantity")?)?;
        let price = parse_price(self.required("price")?)?;
        let sku_type = self.required("skuType")?.parse::<SkuType>()?;

        Ok(NewMedicine {
            name: self.required("name")?.to_string(),
            manufacturer: self.required("manufacturer")?.to_string(),
            sku_type,
            sku_label: self.required("skuLabel")?.to_string(),
            composition: self.present("composition").map(str::to_string),
            quantity,
            price,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for MedicineForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = MedicineForm::new();
        for (k, v) in iter {
            form.set(k, v);
        }
        form
    }
}

/// Whole, non-negative count. `"5"`, `"5.0"` and `"1e2"` are all accepted.
fn parse_quantity(raw: &str) -> DomainResult<u64> {
    if let Ok(q) = raw.parse::<u64>() {
        return Ok(q);
    }
    let f = raw.parse::<f64>().map_err(|_| DomainError::InvalidNumber)?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Ok(f as u64)
    } else {
        Err(DomainError::InvalidNumber)
    }
}

fn parse_price(raw: &str) -> DomainResult<f64> {
    let f = raw.parse::<f64>().map_err(|_| DomainError::InvalidNumber)?;
    if f.is_finite() && f >= 0.0 {
        Ok(f)
    } else {
        Err(DomainError::InvalidNumber)
    }
}
