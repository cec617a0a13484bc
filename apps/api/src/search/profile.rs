//! Demand Profile — the demand list as vehicle kinds and per-kind quantities.
//!
//! Demands with the same length collapse into one vehicle kind, since capacity is
//! a function of vehicle length only. Individual units are never stored here: they
//! are produced on demand, in flattening order, once a search actually needs them.

use crate::models::VehicleDemand;
use crate::search::index::KindIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandProfile {
    /// Distinct vehicle lengths, in order of first appearance.
    lengths: Vec<u32>,
    /// Units demanded per kind.
    quantities: Vec<u64>,
    /// One `(kind, quantity)` run per input demand, in input order.
    runs: Vec<(KindIndex, u32)>,
}

impl DemandProfile {
    /// Builds the profile. Demands are expected to be validated already.
    pub fn from_demands(demands: &[VehicleDemand]) -> Self {
        let mut lengths: Vec<u32> = Vec::new();
        let mut quantities: Vec<u64> = Vec::new();
        let mut runs = Vec::with_capacity(demands.len());

        for demand in demands {
            let kind = match lengths.iter().position(|&l| l == demand.length) {
                Some(existing) => existing,
                None => {
                    lengths.push(demand.length);
                    quantities.push(0);
                    lengths.len() - 1
                }
            };
            quantities[kind] += u64::from(demand.quantity);
            runs.push((KindIndex::new(kind), demand.quantity));
        }

        Self {
            lengths,
            quantities,
            runs,
        }
    }

    #[inline]
    pub fn kind_count(&self) -> usize {
        self.lengths.len()
    }

    #[inline]
    pub fn length_of(&self, kind: KindIndex) -> u32 {
        self.lengths[kind.get()]
    }

    #[inline]
    pub fn quantity_of(&self, kind: KindIndex) -> u64 {
        self.quantities[kind.get()]
    }

    /// Number of vehicle units once every demand is expanded.
    pub fn total_units(&self) -> u64 {
        self.runs.iter().map(|&(_, quantity)| u64::from(quantity)).sum()
    }

    /// Kind of every vehicle unit, in flattening order.
    pub fn units(&self) -> impl Iterator<Item = KindIndex> + '_ {
        self.runs
            .iter()
            .flat_map(|&(kind, quantity)| std::iter::repeat(kind).take(quantity as usize))
    }

    pub fn kinds(&self) -> impl Iterator<Item = KindIndex> {
        (0..self.lengths.len()).map(KindIndex::new)
    }
}
