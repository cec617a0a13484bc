//! Loading listings and vehicle demands from JSON.
//!
//! Object keys are lower-cased before deserialization so `Location_Id`, `LENGTH`
//! and `price_in_cents` all bind to the same fields. Unknown fields are ignored.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::validation::validate_catalog;
use crate::models::{Listing, ValidationError, VehicleDemand};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid record in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Loads the listing catalog. A missing file is an empty catalog, not an error.
pub fn load_catalog(path: &Path) -> Result<Vec<Listing>, CatalogError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Listings file {} not found; starting with an empty catalog", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let listings: Vec<Listing> = parse_records(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_catalog(&listings).map_err(|source| CatalogError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;

    let locations: HashSet<&str> = listings.iter().map(|l| l.location_id.as_str()).collect();
    info!(
        "Loaded {} listings across {} locations from {}",
        listings.len(),
        locations.len(),
        path.display()
    );
    Ok(listings)
}

/// Loads a vehicle demand list. Unlike the catalog, the file must exist.
pub fn load_demands(path: &Path) -> Result<Vec<VehicleDemand>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserializes a demand list from an already-parsed JSON value (e.g. a request body).
pub fn parse_demands(value: Value) -> Result<Vec<VehicleDemand>, serde_json::Error> {
    serde_json::from_value(normalize_keys(value))
}

fn parse_records<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    serde_json::from_value(normalize_keys(value))
}

/// Lower-cases every object key, recursively.
fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k.to_lowercase(), normalize_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::{tempdir, NamedTempFile};

    use super::*;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempdir().unwrap();
        let listings = load_catalog(&dir.path().join("listings.json")).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_catalog_fields_are_case_insensitive() {
        let file = write_temp(
            r#"[
                {"ID": "a", "Location_Id": "loc-1", "LENGTH": 40, "Width": 10, "Price_In_Cents": 1200},
                {"id": "b", "location_id": "loc-1", "length": 20, "width": 20, "price_in_cents": 300, "extra": true}
            ]"#,
        );
        let listings = load_catalog(file.path()).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(
            listings[0],
            Listing {
                id: "a".to_string(),
                location_id: "loc-1".to_string(),
                length: 40,
                width: 10,
                price_in_cents: 1200,
            }
        );
        assert_eq!(listings[1].price_in_cents, 300);
    }

    #[test]
    fn test_malformed_catalog_is_a_parse_error() {
        let file = write_temp(r#"[{"id": "a", "location_id": "l""#);
        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let file = write_temp(r#"[{"id": "a", "location_id": "l", "length": 10, "width": 10}]"#);
        assert!(matches!(
            load_catalog(file.path()),
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_dimension_listing_is_invalid() {
        let file = write_temp(
            r#"[{"id": "a", "location_id": "l", "length": 0, "width": 10, "price_in_cents": 5}]"#,
        );
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Invalid {
                source: ValidationError::NonPositiveListingDimensions { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_load_demands_requires_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load_demands(&dir.path().join("vehicles.json")),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn test_load_demands() {
        let file = write_temp(r#"[{"Length": 10, "Quantity": 1}, {"length": 20, "quantity": 2}]"#);
        let demands = load_demands(file.path()).unwrap();
        assert_eq!(
            demands,
            vec![VehicleDemand::new(10, 1), VehicleDemand::new(20, 2)]
        );
    }

    #[test]
    fn test_parse_demands_from_value() {
        let demands = parse_demands(json!([{"LENGTH": 40, "QUANTITY": 3}])).unwrap();
        assert_eq!(demands, vec![VehicleDemand::new(40, 3)]);
        assert!(parse_demands(json!([{"length": 40, "quantity": -1}])).is_err());
        assert!(parse_demands(json!({"length": 40})).is_err());
    }
}
