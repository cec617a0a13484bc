use serde::{Deserialize, Serialize};

/// The cheapest feasible set of listings found for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub location_id: String,
    /// Listings actually used, unique, in catalog order.
    pub listing_ids: Vec<String>,
    pub total_price_in_cents: u64,
}
