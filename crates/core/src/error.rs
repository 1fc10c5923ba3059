//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The `Display` text of each variant is what API callers see, so keep it
/// free of internal detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was absent or blank.
    #[error("Field '{0}' is required.")]
    MissingField(&'static str),

    /// `quantity` or `price` could not be coerced to a number.
    #[error("Quantity and price must be valid numbers.")]
    InvalidNumber,

    /// `skuType` is outside the fixed set.
    #[error("Field 'skuType' must be one of: allopathy, otc, fmcg.")]
    InvalidSkuType(String),

    /// An identifier was out of range.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Whether this error was caused by caller input (maps to a 4xx).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField(_) | Self::InvalidNumber | Self::InvalidSkuType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        let err = DomainError::missing("skuLabel");
        assert_eq!(err.to_string(), "Field 'skuLabel' is required.");
        assert!(err.is_validation());
    }

    #[test]
    fn invalid_id_is_not_a_validation_error() {
        assert!(!DomainError::invalid_id("x").is_validation());
    }
}
