use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of tile type indices still legal for a cell
///
/// Indices are 0-based positions in the catalog. Iteration is always in
/// ascending index order, which is the candidate order used for weighted picks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PossibilitySet {
    bits: BitVec,
}

impl PossibilitySet {
    /// Create a set with no tile types present
    pub fn empty(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Create a set containing every tile type
    pub fn full(tile_count: usize) -> Self {
        Self {
            bits: bitvec![1; tile_count],
        }
    }

    /// Create a set from tile indices, ignoring indices out of range
    pub fn from_indices(tile_count: usize, indices: &[usize]) -> Self {
        let mut set = Self::empty(tile_count);
        for &index in indices {
            set.insert(index);
        }
        set
    }

    /// Number of tile types the set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile index
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Union this set with another in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Whether every member of this set is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.bits.iter_ones().all(|tile| other.contains(tile))
    }

    /// Test if no tile types are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tile types in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate member indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all member indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PossibilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PossibilitySet({} of {}: {:?})",
            self.count(),
            self.capacity(),
            self.to_vec()
        )
    }
}
