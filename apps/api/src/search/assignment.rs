//! Assignment Search — branch-and-bound placement of vehicle units into listings.
//!
//! # Algorithm
//! Units are placed one at a time in flattening order. Each unit tries every listing
//! of the location in catalog order. A placement is legal while the listing's usage
//! for that vehicle kind is below its capacity. Touching a listing for the first time
//! adds its price; reusing a touched listing is free.
//!
//! A branch is cut when its running cost already meets or exceeds the best complete
//! assignment, so only strictly cheaper assignments replace the incumbent. The first
//! cheapest assignment in (unit, listing) lexicographic order wins ties.
//!
//! Consecutive units of the same kind are interchangeable, so a unit never goes to a
//! listing earlier than the one its identical predecessor took. The lexicographically
//! first optimum already satisfies this, so the result is unchanged.
//!
//! # State
//! `UsageState` is owned by one search and mutated through `apply`/`undo` pairs.
//! Every `apply` returns the record needed to reverse it exactly.

use std::time::{Duration, Instant};

use crate::search::capacity::CapacityTable;
use crate::search::index::{KindIndex, ListingIndex};
use crate::search::profile::DemandProfile;

/// Default per-search node budget.
pub const DEFAULT_NODE_LIMIT: u64 = 5_000_000;

/// Nodes between wall-clock checks.
const TIME_CHECK_INTERVAL: u64 = 4096;

// ────────────────────────────────────────────────────────────────────────────
// Limits, statistics, results
// ────────────────────────────────────────────────────────────────────────────

/// Bounds on one search run. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub node_limit: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            node_limit: Some(DEFAULT_NODE_LIMIT),
            time_limit: None,
        }
    }
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self {
            node_limit: None,
            time_limit: None,
        }
    }
}

/// Whether the search space was exhausted or a budget stopped it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// All branches explored; the best assignment (if any) is optimal.
    Complete,
    /// A limit was hit; the best assignment (if any) is valid but may not be optimal.
    Truncated,
}

/// Counters collected during one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Placements descended into.
    pub nodes_explored: u64,
    /// Placements skipped because the listing was full for that vehicle kind.
    pub prunings_capacity: u64,
    /// Placements skipped because the cost could not beat the incumbent.
    pub prunings_bound: u64,
    /// Complete assignments that improved the incumbent.
    pub solutions_found: u64,
    pub elapsed: Duration,
}

/// A complete placement of every vehicle unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Listing chosen for each unit, in flattening order.
    placements: Vec<ListingIndex>,
    cost: u64,
}

impl Assignment {
    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    #[inline]
    pub fn placements(&self) -> &[ListingIndex] {
        &self.placements
    }

    /// Distinct listings holding at least one unit, in ascending index order.
    pub fn used_listings(&self) -> Vec<ListingIndex> {
        let mut used = self.placements.clone();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Units of `kind` routed to `listing`.
    pub fn units_in(&self, listing: ListingIndex, kind: KindIndex, profile: &DemandProfile) -> u32 {
        self.placements
            .iter()
            .zip(profile.units())
            .filter(|&(&l, k)| l == listing && k == kind)
            .count() as u32
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub best: Option<Assignment>,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Usage state
// ────────────────────────────────────────────────────────────────────────────

/// Undo record for a single placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    listing: ListingIndex,
    kind: KindIndex,
    previous_cost: u64,
}

/// Units placed per (listing, kind), units per listing, and the running cost.
#[derive(Debug)]
struct UsageState {
    kinds: usize,
    used: Vec<u32>,
    load: Vec<u32>,
    cost: u64,
    placements: Vec<ListingIndex>,
}

impl UsageState {
    fn new(listings: usize, kinds: usize, units: usize) -> Self {
        Self {
            kinds,
            used: vec![0; listings * kinds],
            load: vec![0; listings],
            cost: 0,
            placements: Vec::with_capacity(units),
        }
    }

    #[inline]
    fn used(&self, listing: ListingIndex, kind: KindIndex) -> u32 {
        self.used[listing.get() * self.kinds + kind.get()]
    }

    #[inline]
    fn is_touched(&self, listing: ListingIndex) -> bool {
        self.load[listing.get()] > 0
    }

    /// Places one unit. `added_cost` is the listing price on first touch, zero otherwise.
    #[inline]
    fn apply(&mut self, listing: ListingIndex, kind: KindIndex, added_cost: u64) -> Placement {
        let placement = Placement {
            listing,
            kind,
            previous_cost: self.cost,
        };
        self.used[listing.get() * self.kinds + kind.get()] += 1;
        self.load[listing.get()] += 1;
        self.cost = self.cost.saturating_add(added_cost);
        self.placements.push(listing);
        placement
    }

    /// Reverses the matching `apply`. The listing leaves the touched set when its load hits zero.
    #[inline]
    fn undo(&mut self, placement: Placement) {
        let Placement {
            listing,
            kind,
            previous_cost,
        } = placement;
        debug_assert_eq!(self.placements.last(), Some(&listing));
        self.placements.pop();
        self.used[listing.get() * self.kinds + kind.get()] -= 1;
        self.load[listing.get()] -= 1;
        self.cost = previous_cost;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Search
// ────────────────────────────────────────────────────────────────────────────

/// Finds the cheapest assignment of every unit in `profile` to the listings whose
/// prices are given in catalog order, under the capacities of one orientation.
///
/// Returns no assignment when none exists. That is a normal outcome, not an error.
/// Memory grows linearly with the unit count; callers bound it beforehand.
pub fn search_assignment(
    prices: &[u64],
    capacity: &CapacityTable,
    profile: &DemandProfile,
    limits: &SearchLimits,
) -> SearchReport {
    debug_assert_eq!(capacity.kind_count(), profile.kind_count());
    debug_assert_eq!(capacity.listing_count(), prices.len());

    let units: Vec<KindIndex> = profile.units().collect();
    let mut search = AssignmentSearch {
        prices,
        capacity,
        units: &units,
        limits,
        state: UsageState::new(prices.len(), profile.kind_count(), units.len()),
        best: None,
        best_cost: u64::MAX,
        stats: SearchStats::default(),
        started: Instant::now(),
        stopped: false,
    };
    search.explore();
    search.stats.elapsed = search.started.elapsed();

    SearchReport {
        best: search.best,
        outcome: if search.stopped {
            SearchOutcome::Truncated
        } else {
            SearchOutcome::Complete
        },
        stats: search.stats,
    }
}

/// One level of the explicit search stack: the unit at this depth, the next listing
/// to try for it, and the placement currently applied (undone before the next try).
#[derive(Debug)]
struct Frame {
    next: usize,
    placement: Option<Placement>,
}

struct AssignmentSearch<'a> {
    prices: &'a [u64],
    capacity: &'a CapacityTable,
    units: &'a [KindIndex],
    limits: &'a SearchLimits,
    state: UsageState,
    best: Option<Assignment>,
    best_cost: u64,
    stats: SearchStats,
    started: Instant,
    stopped: bool,
}

impl AssignmentSearch<'_> {
    /// Depth-first search over an explicit frame stack, so depth is not bounded by
    /// the thread stack.
    fn explore(&mut self) {
        if self.units.is_empty() {
            self.record_if_better();
            return;
        }

        let mut frames: Vec<Frame> = Vec::with_capacity(self.units.len());
        frames.push(Frame {
            next: 0,
            placement: None,
        });

        while !frames.is_empty() {
            let depth = frames.len() - 1;
            let frame = &mut frames[depth];
            if let Some(placement) = frame.placement.take() {
                self.state.undo(placement);
            }

            let Some((listing, added_cost)) = self.next_candidate(depth, &mut frame.next) else {
                frames.pop();
                continue;
            };
            if !self.enter_node() {
                return;
            }
            frame.placement = Some(self.state.apply(listing, self.units[depth], added_cost));

            if depth + 1 == self.units.len() {
                self.record_if_better();
            } else {
                frames.push(Frame {
                    next: self.first_listing(depth + 1),
                    placement: None,
                });
            }
        }
    }

    /// First listing the unit at `depth` may use. An identical predecessor's choice is
    /// the lower bound.
    fn first_listing(&self, depth: usize) -> usize {
        match depth.checked_sub(1) {
            Some(prev) if self.units[prev] == self.units[depth] => {
                self.state.placements[prev].get()
            }
            _ => 0,
        }
    }

    /// Advances `next` past full or too-expensive listings and returns the next legal
    /// placement for the unit at `depth` with the cost it adds.
    fn next_candidate(&mut self, depth: usize, next: &mut usize) -> Option<(ListingIndex, u64)> {
        let kind = self.units[depth];
        while *next < self.prices.len() {
            let index = *next;
            *next += 1;

            let listing = ListingIndex::new(index);
            if self.state.used(listing, kind) >= self.capacity.get(listing, kind) {
                self.stats.prunings_capacity += 1;
                continue;
            }

            let added_cost = if self.state.is_touched(listing) {
                0
            } else {
                self.prices[index]
            };
            if self.state.cost.saturating_add(added_cost) >= self.best_cost {
                self.stats.prunings_bound += 1;
                continue;
            }
            return Some((listing, added_cost));
        }
        None
    }

    fn record_if_better(&mut self) {
        if self.state.cost < self.best_cost {
            self.best_cost = self.state.cost;
            self.best = Some(Assignment {
                placements: self.state.placements.clone(),
                cost: self.state.cost,
            });
            self.stats.solutions_found += 1;
        }
    }

    /// Counts a node and reports whether the budget allows exploring it.
    fn enter_node(&mut self) -> bool {
        if let Some(limit) = self.limits.node_limit {
            if self.stats.nodes_explored >= limit {
                self.stopped = true;
                return false;
            }
        }
        self.stats.nodes_explored += 1;

        if let Some(time_limit) = self.limits.time_limit {
            if self.stats.nodes_explored % TIME_CHECK_INTERVAL == 0
                && self.started.elapsed() > time_limit
            {
                self.stopped = true;
                return false;
            }
        }
        true
    }
}
