//! Capacity Model — how many units of one vehicle length a listing holds in isolation.
//!
//! Capacity never reasons about mixed lengths inside one listing: it is the count
//! achievable if every vehicle placed there had the same length and orientation.

use crate::models::{Listing, VEHICLE_WIDTH};
use crate::search::index::{KindIndex, ListingIndex};
use crate::search::profile::DemandProfile;

/// Which listing dimension the fixed vehicle width is laid against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Vehicles side by side across the listing width, nose along its length.
    Widthwise,
    /// Vehicles side by side along the listing length, nose across its width.
    Lengthwise,
}

impl Orientation {
    /// Evaluation order. Widthwise comes first so it wins exact ties.
    pub const ALL: [Orientation; 2] = [Orientation::Widthwise, Orientation::Lengthwise];

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Widthwise => "widthwise",
            Orientation::Lengthwise => "lengthwise",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maximum units of `vehicle_length` that fit in `listing` under `orientation`.
///
/// A zero vehicle length yields zero capacity rather than dividing by zero.
pub fn unit_capacity(listing: &Listing, vehicle_length: u32, orientation: Orientation) -> u32 {
    let (across, along) = match orientation {
        Orientation::Widthwise => (listing.width, listing.length),
        Orientation::Lengthwise => (listing.length, listing.width),
    };
    let lanes = across / VEHICLE_WIDTH;
    let depth = along.checked_div(vehicle_length).unwrap_or(0);
    lanes.min(depth)
}

/// Capacity of every (listing, vehicle kind) pair of one location under one orientation.
///
/// Stored row-major by listing so a listing's row is contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    orientation: Orientation,
    listings: usize,
    kinds: usize,
    cells: Vec<u32>,
}

impl CapacityTable {
    pub fn build(listings: &[&Listing], profile: &DemandProfile, orientation: Orientation) -> Self {
        let kinds = profile.kind_count();
        let mut cells = Vec::with_capacity(listings.len() * kinds);
        for listing in listings {
            for kind in profile.kinds() {
                cells.push(unit_capacity(listing, profile.length_of(kind), orientation));
            }
        }
        Self {
            orientation,
            listings: listings.len(),
            kinds,
            cells,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn kind_count(&self) -> usize {
        self.kinds
    }

    #[inline]
    pub fn listing_count(&self) -> usize {
        self.listings
    }

    #[inline]
    pub fn get(&self, listing: ListingIndex, kind: KindIndex) -> u32 {
        self.cells[listing.get() * self.kinds + kind.get()]
    }

    /// Sum of capacities for `kind` across all listings.
    pub fn total_for(&self, kind: KindIndex) -> u64 {
        self.cells
            .iter()
            .skip(kind.get())
            .step_by(self.kinds.max(1))
            .map(|&c| u64::from(c))
            .sum()
    }

    /// Cheap necessary condition: every kind has enough summed capacity for its demand.
    pub fn covers(&self, profile: &DemandProfile) -> bool {
        profile
            .kinds()
            .all(|kind| self.total_for(kind) >= profile.quantity_of(kind))
    }
}
