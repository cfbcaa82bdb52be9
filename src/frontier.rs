use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::CellId;

/// Heap entry, ordered so that `BinaryHeap` pops the lowest FCost first and,
/// among equal FCosts, the earliest inserted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    f_cost: i32,
    seq: u64,
    id: CellId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Live membership record for a cell currently in the open set.
#[derive(Debug, Clone, Copy)]
struct Slot {
    f_cost: i32,
    seq: u64,
}

/// Open set with stable FCost ordering.
///
/// A cell keeps the sequence number of its first insertion, so lowering its
/// FCost does not move it behind cells inserted later with the same FCost.
/// Lowered entries are pushed again and the superseded heap entries are
/// dropped lazily on pop.
#[derive(Debug)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
    slots: Vec<Option<Slot>>,
    next_seq: u64,
    live: usize,
}

impl Frontier {
    pub(crate) fn new(cell_count: usize) -> Self {
        Frontier {
            heap: BinaryHeap::new(),
            slots: vec![None; cell_count],
            next_seq: 0,
            live: 0,
        }
    }

    pub(crate) fn contains(&self, id: CellId) -> bool {
        self.slots[id.index()].is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Append a cell that is not yet in the open set.
    pub(crate) fn push(&mut self, id: CellId, f_cost: i32) {
        debug_assert!(!self.contains(id));
        let seq = self.next_seq;
        self.next_seq += 1;
        self.slots[id.index()] = Some(Slot { f_cost, seq });
        self.heap.push(Entry { f_cost, seq, id });
        self.live += 1;
    }

    /// Re-key a cell already in the open set, keeping its insertion order.
    pub(crate) fn update(&mut self, id: CellId, f_cost: i32) {
        let Some(slot) = self.slots[id.index()].as_mut() else {
            return;
        };
        if slot.f_cost == f_cost {
            return;
        }
        slot.f_cost = f_cost;
        let seq = slot.seq;
        self.heap.push(Entry { f_cost, seq, id });
    }

    /// Remove and return the cell with the lowest FCost.
    pub(crate) fn pop(&mut self) -> Option<CellId> {
        while let Some(entry) = self.heap.pop() {
            let slot = self.slots[entry.id.index()];
            // Skip stale entries.
            if matches!(slot, Some(live) if live.seq == entry.seq && live.f_cost == entry.f_cost) {
                self.slots[entry.id.index()] = None;
                self.live -= 1;
                return Some(entry.id);
            }
        }
        None
    }
}
