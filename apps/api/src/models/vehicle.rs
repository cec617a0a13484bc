use serde::{Deserialize, Serialize};

use crate::models::validation::ValidationError;

/// Width shared by every vehicle, in storage length units.
pub const VEHICLE_WIDTH: u32 = 10;

/// A request to store `quantity` identical vehicles of the given length.
///
/// Width is implicit (`VEHICLE_WIDTH`); a `width` field in incoming JSON is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDemand {
    pub length: u32,
    pub quantity: u32,
}

impl VehicleDemand {
    pub fn new(length: u32, quantity: u32) -> Self {
        Self { length, quantity }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.length == 0 {
            return Err(ValidationError::NonPositiveVehicleLength);
        }
        if self.quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity {
                length: self.length,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_positive_values() {
        assert!(VehicleDemand::new(40, 2).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_length() {
        assert_eq!(
            VehicleDemand::new(0, 1).validate(),
            Err(ValidationError::NonPositiveVehicleLength)
        );
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        assert_eq!(
            VehicleDemand::new(25, 0).validate(),
            Err(ValidationError::NonPositiveQuantity { length: 25 })
        );
    }

    #[test]
    fn test_width_field_is_ignored() {
        let demand: VehicleDemand =
            serde_json::from_str(r#"{"length": 30, "width": 99, "quantity": 3}"#).unwrap();
        assert_eq!(demand, VehicleDemand::new(30, 3));
    }
}
