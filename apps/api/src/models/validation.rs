use std::collections::HashSet;

use thiserror::Error;

use crate::models::listing::Listing;
use crate::models::vehicle::VehicleDemand;

/// Rejected input records. Capacities are only computed from validated records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least one vehicle is required")]
    EmptyDemand,

    #[error("vehicle length must be positive")]
    NonPositiveVehicleLength,

    #[error("quantity must be positive (vehicle length {length})")]
    NonPositiveQuantity { length: u32 },

    #[error("listing id must not be empty")]
    MissingListingId,

    #[error("listing '{id}' must have positive length and width")]
    NonPositiveListingDimensions { id: String },

    #[error("listing id '{id}' appears more than once in the catalog")]
    DuplicateListingId { id: String },

    #[error("{units} vehicles fit at a location but exceed the search limit of {max}")]
    TooManyUnits { units: u64, max: u64 },
}

/// Validates a demand list. An empty list is rejected: there is nothing to store.
pub fn validate_demands(demands: &[VehicleDemand]) -> Result<(), ValidationError> {
    if demands.is_empty() {
        return Err(ValidationError::EmptyDemand);
    }
    demands.iter().try_for_each(VehicleDemand::validate)
}

/// Validates every listing and checks that listing ids are unique.
pub fn validate_catalog(catalog: &[Listing]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for listing in catalog {
        listing.validate()?;
        if !seen.insert(listing.id.as_str()) {
            return Err(ValidationError::DuplicateListingId {
                id: listing.id.clone(),
            });
        }
    }
    Ok(())
}
