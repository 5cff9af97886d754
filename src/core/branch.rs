//! Two-bit saturating branch predictor.
//!
//! A direct-mapped table of 10 entries, indexed by `pc mod 10`. Each
//! entry is a two-bit counter that saturates at its extremes; the
//! predictor predicts taken whenever the counter is in one of the two
//! "taken" states.

use crate::common::BHT_ENTRIES;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BranchState {
    #[default]
    StrongNotTaken,
    WeakNotTaken,
    WeakTaken,
    StrongTaken,
}

impl BranchState {
    pub fn predicts_taken(self) -> bool {
        matches!(self, BranchState::WeakTaken | BranchState::StrongTaken)
    }

    /// Saturating update: a taken outcome moves one step toward
    /// `StrongTaken`, capping there; not-taken moves one step toward
    /// `StrongNotTaken`, capping there.
    pub fn update(self, taken: bool) -> BranchState {
        use BranchState::*;
        match (self, taken) {
            (StrongNotTaken, true) => WeakNotTaken,
            (WeakNotTaken, true) => WeakTaken,
            (WeakTaken, true) => StrongTaken,
            (StrongTaken, true) => StrongTaken,
            (StrongNotTaken, false) => StrongNotTaken,
            (WeakNotTaken, false) => StrongNotTaken,
            (WeakTaken, false) => WeakNotTaken,
            (StrongTaken, false) => WeakTaken,
        }
    }
}

#[derive(Clone, Debug)]
pub struct BranchPredictor {
    table: Vec<BranchState>,
}

impl BranchPredictor {
    pub fn new(entries: usize) -> BranchPredictor {
        BranchPredictor {
            table: vec![BranchState::default(); entries],
        }
    }

    pub fn with_default_size() -> BranchPredictor {
        BranchPredictor::new(BHT_ENTRIES)
    }

    fn index(&self, pc: u32) -> usize {
        (pc as usize) % self.table.len()
    }

    pub fn predict(&self, pc: u32) -> BranchState {
        self.table[self.index(pc)]
    }

    pub fn update(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        self.table[idx] = self.table[idx].update(taken);
    }
}
