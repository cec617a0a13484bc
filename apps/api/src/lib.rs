//! Vehicle storage search service.
//!
//! Given vehicles to store and a catalog of listings grouped by location, finds every
//! location that can hold all vehicles, the cheapest set of its listings that does so,
//! and ranks the locations by price.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod search;
pub mod state;
