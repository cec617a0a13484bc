//! Dense indices used by the search tables in place of listing ids and vehicle lengths.

/// Position of a listing within one location's listing slice (catalog order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingIndex(usize);

impl ListingIndex {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

/// Position of a distinct vehicle length within a `DemandProfile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KindIndex(usize);

impl KindIndex {
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}
