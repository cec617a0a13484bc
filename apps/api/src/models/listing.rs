use serde::{Deserialize, Serialize};

use crate::models::validation::ValidationError;

/// A rentable storage space. Listings sharing a `location_id` belong to one site.
///
/// `price_in_cents` is charged once if the listing holds any vehicle at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub location_id: String,
    pub length: u32,
    pub width: u32,
    pub price_in_cents: u64,
}

impl Listing {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingListingId);
        }
        if self.length == 0 || self.width == 0 {
            return Err(ValidationError::NonPositiveListingDimensions {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, length: u32, width: u32) -> Listing {
        Listing {
            id: id.to_string(),
            location_id: "loc".to_string(),
            length,
            width,
            price_in_cents: 100,
        }
    }

    #[test]
    fn test_validate_accepts_positive_dimensions() {
        assert!(listing("a", 10, 10).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        assert_eq!(
            listing("  ", 10, 10).validate(),
            Err(ValidationError::MissingListingId)
        );
    }

    #[test]
    fn test_validate_rejects_zero_width() {
        assert_eq!(
            listing("a", 10, 0).validate(),
            Err(ValidationError::NonPositiveListingDimensions {
                id: "a".to_string()
            })
        );
    }

    #[test]
    fn test_negative_price_fails_to_deserialize() {
        let raw = r#"{"id":"a","location_id":"l","length":10,"width":10,"price_in_cents":-5}"#;
        assert!(serde_json::from_str::<Listing>(raw).is_err());
    }
}
