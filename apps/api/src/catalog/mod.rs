// Catalog supply: JSON listing/demand files and request bodies.
// Field names match case-insensitively; every loaded listing is validated.

pub mod loading;

pub use loading::{load_catalog, load_demands, parse_demands, CatalogError};
