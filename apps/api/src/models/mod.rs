pub mod listing;
pub mod search_result;
pub mod validation;
pub mod vehicle;

pub use listing::Listing;
pub use search_result::SearchResult;
pub use validation::ValidationError;
pub use vehicle::{VehicleDemand, VEHICLE_WIDTH};
