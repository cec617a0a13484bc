use std::sync::Arc;

use crate::models::Listing;
use crate::search::SearchLimits;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Listing catalog, loaded once at startup and never mutated.
    pub catalog: Arc<Vec<Listing>>,
    pub limits: SearchLimits,
}
