//! Catalog Aggregator — groups the catalog by location, resolves each location and
//! ranks the feasible ones by total price.
//!
//! Locations are independent, so they are searched in parallel on the rayon pool.
//! Each task owns its capacity tables and usage state.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::models::validation::{validate_catalog, validate_demands};
use crate::models::{Listing, SearchResult, ValidationError, VehicleDemand};
use crate::search::assignment::SearchLimits;
use crate::search::profile::DemandProfile;
use crate::search::resolver::{resolve_location, LocationPlan};

/// Every location able to store all demanded vehicles, cheapest first, using the
/// default search limits.
pub fn find_locations(
    demands: &[VehicleDemand],
    catalog: &[Listing],
) -> Result<Vec<SearchResult>, ValidationError> {
    find_locations_with_limits(demands, catalog, &SearchLimits::default())
}

/// Same as [`find_locations`] with explicit per-search limits.
///
/// Results are ordered by `total_price_in_cents`, then `location_id`.
pub fn find_locations_with_limits(
    demands: &[VehicleDemand],
    catalog: &[Listing],
    limits: &SearchLimits,
) -> Result<Vec<SearchResult>, ValidationError> {
    validate_demands(demands)?;
    validate_catalog(catalog)?;

    let profile = DemandProfile::from_demands(demands);
    let groups = group_by_location(catalog);
    debug!(
        "Searching {} locations for {} vehicle units",
        groups.len(),
        profile.total_units()
    );

    let plans: Vec<LocationPlan> = groups
        .into_par_iter()
        .filter_map(|(location_id, listings)| {
            resolve_location(location_id, &listings, &profile, limits).transpose()
        })
        .collect::<Result<_, ValidationError>>()?;
    let mut results: Vec<SearchResult> = plans.into_iter().map(LocationPlan::into_result).collect();

    sort_results(&mut results);
    debug!("{} locations can store the request", results.len());
    Ok(results)
}

/// Groups listings by `location_id`, keeping catalog order inside each group.
pub fn group_by_location(catalog: &[Listing]) -> BTreeMap<&str, Vec<&Listing>> {
    let mut groups: BTreeMap<&str, Vec<&Listing>> = BTreeMap::new();
    for listing in catalog {
        groups
            .entry(listing.location_id.as_str())
            .or_default()
            .push(listing);
    }
    groups
}

fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        a.total_price_in_cents
            .cmp(&b.total_price_in_cents)
            .then_with(|| a.location_id.cmp(&b.location_id))
    });
}
