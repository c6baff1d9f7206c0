use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct IndexEntry {
    cardinality: usize,
    sequence: u64,
    cell: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Membership {
    cardinality: usize,
    sequence: u64,
}

/// Ordered index of narrowed but unresolved cells
///
/// Cells are ordered by ascending possibility-set size; ties go to the cell
/// that entered the index first. Updates push a fresh heap entry and leave the
/// old one behind, stale entries are discarded lazily when they reach the top.
#[derive(Clone, Debug)]
pub struct EntropyIndex {
    heap: BinaryHeap<Reverse<IndexEntry>>,
    members: Vec<Option<Membership>>,
    next_sequence: u64,
    len: usize,
}

impl EntropyIndex {
    /// Create an empty index for a grid with `cell_count` cells
    pub fn new(cell_count: usize) -> Self {
        Self {
            heap: BinaryHeap::new(),
            members: vec![None; cell_count],
            next_sequence: 0,
            len: 0,
        }
    }

    /// Insert a cell or update its cardinality
    ///
    /// A cell keeps the tie-break rank it received on first insertion.
    pub fn upsert(&mut self, cell: usize, cardinality: usize) {
        let Some(slot) = self.members.get_mut(cell) else {
            return;
        };

        let sequence = if let Some(existing) = slot {
            existing.sequence
        } else {
            let sequence = self.next_sequence;
            self.next_sequence += 1;
            self.len += 1;
            sequence
        };

        *slot = Some(Membership {
            cardinality,
            sequence,
        });
        self.heap.push(Reverse(IndexEntry {
            cardinality,
            sequence,
            cell,
        }));
    }

    /// Remove a cell, returning whether it was present
    pub fn remove(&mut self, cell: usize) -> bool {
        let Some(slot) = self.members.get_mut(cell) else {
            return false;
        };
        if slot.take().is_some() {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Test membership
    pub fn contains(&self, cell: usize) -> bool {
        matches!(self.members.get(cell), Some(Some(_)))
    }

    /// Cardinality recorded for a member cell
    pub fn cardinality(&self, cell: usize) -> Option<usize> {
        self.members
            .get(cell)
            .copied()
            .flatten()
            .map(|membership| membership.cardinality)
    }

    /// Number of member cells
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no cell is indexed
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Member with the smallest cardinality, dropping stale heap entries
    pub fn peek_min(&mut self) -> Option<(usize, usize)> {
        while let Some(&Reverse(entry)) = self.heap.peek() {
            let current = self.members.get(entry.cell).copied().flatten();
            if current
                == Some(Membership {
                    cardinality: entry.cardinality,
                    sequence: entry.sequence,
                })
            {
                return Some((entry.cell, entry.cardinality));
            }
            self.heap.pop();
        }
        None
    }
}
