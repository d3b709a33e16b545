//! Types for implementing a table of predictors.

use crate::branch::Addr;

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given the address of a branch, return the corresponding index into
    /// the table.
    fn get_index(&self, pc: Addr) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }

    /// Returns the number of bits in an index.
    fn index_bits(&self) -> u32 {
        self.size().trailing_zeros()
    }
}

/// Interface to a *tagged* table of predictors.
pub trait TaggedPredictorTable: PredictorTable {
    /// Returns the tag for a branch: the address bits above the index.
    fn get_tag(&self, pc: Addr) -> u32;
}
