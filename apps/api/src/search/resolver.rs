//! Location Resolver — runs the assignment search under both orientations for one
//! location and keeps the cheaper feasible plan.

use tracing::{debug, warn};

use crate::models::{Listing, SearchResult, ValidationError};
use crate::search::assignment::{search_assignment, Assignment, SearchLimits, SearchOutcome};
use crate::search::capacity::{CapacityTable, Orientation};
use crate::search::profile::DemandProfile;

/// The winning plan for one location.
#[derive(Debug, Clone)]
pub struct LocationPlan {
    pub orientation: Orientation,
    pub assignment: Assignment,
    pub outcome: SearchOutcome,
    pub result: SearchResult,
}

impl LocationPlan {
    pub fn into_result(self) -> SearchResult {
        self.result
    }
}

/// Most vehicle units a single search will place. Demands above this are only
/// searched when some location could hold them, and are then rejected.
pub const MAX_SEARCH_UNITS: u64 = 100_000;

/// Resolves one location. `listings` must all share `location_id` and be in catalog order.
///
/// Returns `None` when neither orientation can store every unit. On equal cost the
/// widthwise plan is kept. Fails with `TooManyUnits` when the location has enough
/// capacity but the demand is larger than [`MAX_SEARCH_UNITS`].
pub fn resolve_location(
    location_id: &str,
    listings: &[&Listing],
    profile: &DemandProfile,
    limits: &SearchLimits,
) -> Result<Option<LocationPlan>, ValidationError> {
    let prices: Vec<u64> = listings.iter().map(|l| l.price_in_cents).collect();
    let mut best: Option<(Orientation, Assignment, SearchOutcome)> = None;

    for orientation in Orientation::ALL {
        let table = CapacityTable::build(listings, profile, orientation);
        if !table.covers(profile) {
            debug!("Location {location_id} ({orientation}): not enough capacity, skipping search");
            continue;
        }
        let units = profile.total_units();
        if units > MAX_SEARCH_UNITS {
            return Err(ValidationError::TooManyUnits {
                units,
                max: MAX_SEARCH_UNITS,
            });
        }

        let report = search_assignment(&prices, &table, profile, limits);
        debug!(
            "Location {location_id} ({orientation}): {} nodes, {} bound prunes, {} capacity prunes, {} solutions in {:?}",
            report.stats.nodes_explored,
            report.stats.prunings_bound,
            report.stats.prunings_capacity,
            report.stats.solutions_found,
            report.stats.elapsed,
        );
        if report.outcome == SearchOutcome::Truncated {
            warn!(
                "Location {location_id} ({orientation}): search budget exhausted after {} nodes; result may not be optimal",
                report.stats.nodes_explored
            );
        }

        let Some(assignment) = report.best else {
            continue;
        };
        let improves = best
            .as_ref()
            .map_or(true, |(_, current, _)| assignment.cost() < current.cost());
        if improves {
            best = Some((table.orientation(), assignment, report.outcome));
        }
    }

    let Some((orientation, assignment, outcome)) = best else {
        return Ok(None);
    };
    let result = SearchResult {
        location_id: location_id.to_string(),
        listing_ids: assignment
            .used_listings()
            .into_iter()
            .map(|index| listings[index.get()].id.clone())
            .collect(),
        total_price_in_cents: assignment.cost(),
    };

    Ok(Some(LocationPlan {
        orientation,
        assignment,
        outcome,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VehicleDemand;

    fn listing(id: &str, length: u32, width: u32, price: u64) -> Listing {
        Listing {
            id: id.to_string(),
            location_id: "loc".to_string(),
            length,
            width,
            price_in_cents: price,
        }
    }

    fn resolve(listings: &[Listing], demands: &[VehicleDemand]) -> Option<LocationPlan> {
        let refs: Vec<&Listing> = listings.iter().collect();
        let profile = DemandProfile::from_demands(demands);
        resolve_location("loc", &refs, &profile, &SearchLimits::unbounded()).unwrap()
    }

    #[test]
    fn test_widthwise_only_location() {
        let plan = resolve(&[listing("a", 100, 20, 500)], &[VehicleDemand::new(40, 2)]).unwrap();
        assert_eq!(plan.orientation, Orientation::Widthwise);
        assert_eq!(plan.outcome, SearchOutcome::Complete);
        assert_eq!(
            plan.into_result(),
            SearchResult {
                location_id: "loc".to_string(),
                listing_ids: vec!["a".to_string()],
                total_price_in_cents: 500,
            }
        );
    }

    #[test]
    fn test_infeasible_location_yields_none() {
        assert!(resolve(&[listing("a", 100, 20, 500)], &[VehicleDemand::new(40, 3)]).is_none());
    }

    #[test]
    fn test_lengthwise_only_location() {
        // Widthwise: min(50 / 10, 20 / 40) = 0. Lengthwise: min(20 / 10, 50 / 40) = 1.
        let plan = resolve(&[listing("a", 20, 50, 300)], &[VehicleDemand::new(40, 1)]).unwrap();
        assert_eq!(plan.orientation, Orientation::Lengthwise);
        assert_eq!(plan.result.total_price_in_cents, 300);
    }

    #[test]
    fn test_cheaper_orientation_wins() {
        // "wide" holds two units widthwise only, "deep" holds two units lengthwise only.
        let listings = [listing("wide", 80, 20, 500), listing("deep", 20, 80, 300)];
        let plan = resolve(&listings, &[VehicleDemand::new(40, 2)]).unwrap();
        assert_eq!(plan.orientation, Orientation::Lengthwise);
        assert_eq!(plan.result.listing_ids, vec!["deep".to_string()]);
        assert_eq!(plan.result.total_price_in_cents, 300);
    }

    #[test]
    fn test_exact_tie_prefers_widthwise() {
        // Square listing: both orientations give the same capacities and cost.
        let plan = resolve(&[listing("a", 40, 40, 250)], &[VehicleDemand::new(40, 1)]).unwrap();
        assert_eq!(plan.orientation, Orientation::Widthwise);
    }

    #[test]
    fn test_listing_ids_follow_catalog_order() {
        let listings = [
            listing("first", 40, 10, 100),
            listing("second", 40, 10, 100),
        ];
        let plan = resolve(&listings, &[VehicleDemand::new(40, 2)]).unwrap();
        assert_eq!(
            plan.result.listing_ids,
            vec!["first".to_string(), "second".to_string()]
        );
        assert_eq!(plan.result.total_price_in_cents, 200);
    }

    #[test]
    fn test_huge_infeasible_demand_is_skipped() {
        let refs = [&listing("a", 100, 20, 500)];
        let profile = DemandProfile::from_demands(&[VehicleDemand::new(40, 2_000_000_000)]);
        let plan = resolve_location("loc", &refs, &profile, &SearchLimits::default()).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn test_huge_feasible_demand_is_rejected() {
        let refs = [&listing("a", 40_000_000, 10_000_000, 500)];
        let profile = DemandProfile::from_demands(&[VehicleDemand::new(40, 500_000)]);
        let err = resolve_location("loc", &refs, &profile, &SearchLimits::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooManyUnits {
                units: 500_000,
                max: MAX_SEARCH_UNITS,
            }
        );
    }
}
