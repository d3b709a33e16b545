//! Implementations of a pattern history table (PHT).

use log::trace;
use crate::branch::*;
use crate::error::*;
use crate::history::GlobalHistoryRegister;
use crate::predictor::*;

/// Counter value for a newly-allocated tagged entry ("weakly not-taken").
const WEAKLY_NOT_TAKEN: u8 = 1;

/// Number of table entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSize { S64, S128, S256 }
impl TableSize {
    pub const ALL: [Self; 3] = [Self::S64, Self::S128, Self::S256];

    pub fn entries(&self) -> usize {
        match self {
            Self::S64  => 64,
            Self::S128 => 128,
            Self::S256 => 256,
        }
    }
}

/// Strategy for forming an index into a [PatternHistoryTable].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexMode {
    /// Indexed by address bits, with the remaining upper bits kept as a tag.
    /// A tag miss resets the entry before it is used.
    Tagged,

    /// Indexed by address bits. Aliasing branches share an entry.
    Untagged,

    /// Address bits concatenated with the most recent global outcome.
    Global,

    /// Address bits with the most recent global outcome XORed into the top
    /// bit of the index.
    GShare,
}
impl IndexMode {
    pub const ALL: [Self; 4] = [
        Self::Tagged, Self::Untagged, Self::Global, Self::GShare
    ];
}

/// A table of 2-bit [SaturatingCounter] indexed by the program counter
/// (and optionally the most recent global outcome).
pub struct PatternHistoryTable {
    mode: IndexMode,
    size: TableSize,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Tag associated with each entry (only used by [IndexMode::Tagged])
    tags: Vec<Option<u32>>,

    /// Most recent outcome of any branch
    ghr: GlobalHistoryRegister,
}
impl PatternHistoryTable {
    pub fn new(mode: IndexMode, size: TableSize) -> Self {
        let cfg = SaturatingCounterConfig::TWO_BIT;
        let n = size.entries();
        let tags = match mode {
            IndexMode::Tagged => vec![None; n],
            _ => Vec::new(),
        };
        Self {
            mode,
            size,
            data: vec![cfg.build(); n],
            tags,
            ghr: GlobalHistoryRegister::new(1),
        }
    }

    pub fn mode(&self) -> IndexMode { self.mode }

    /// Returns the global history register.
    pub fn history(&self) -> &GlobalHistoryRegister { &self.ghr }

    /// Returns the tag currently stored for an entry.
    pub fn get_stored_tag(&self, idx: usize) -> Option<u32> {
        self.tags.get(idx).copied().flatten()
    }
}

impl PredictorTable for PatternHistoryTable {
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size.entries() }

    fn get_index(&self, pc: Addr) -> usize {
        let word = (pc >> 2) as usize;
        let mask = self.index_mask();
        match self.mode {
            IndexMode::Tagged | IndexMode::Untagged => word & mask,
            IndexMode::Global => {
                ((word & (mask >> 1)) << 1) | self.ghr.fold(1)
            },
            IndexMode::GShare => {
                (word & mask) ^ (self.ghr.fold(1) << (self.index_bits() - 1))
            },
        }
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}

impl TaggedPredictorTable for PatternHistoryTable {
    fn get_tag(&self, pc: Addr) -> u32 {
        pc >> (self.index_bits() + 2)
    }
}

impl Predictor for PatternHistoryTable {
    fn name(&self) -> &'static str {
        PredictorKind::Counter(self.mode, self.size).name()
    }

    fn predict(&mut self, inst: &BranchInstruction) -> Outcome {
        let idx = self.get_index(inst.addr);
        if self.mode == IndexMode::Tagged {
            let tag = self.get_tag(inst.addr);
            if self.tags[idx] != Some(tag) {
                trace!("tag miss at {:08x} (slot {})", inst.addr, idx);
                self.tags[idx] = Some(tag);
                self.get_entry_mut(idx).set(WEAKLY_NOT_TAKEN);
            }
        }
        self.get_entry(idx).predict()
    }

    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>
    {
        let idx = self.get_index(inst.addr);
        match self.mode {
            IndexMode::Tagged => {
                let tag = self.get_tag(inst.addr);
                if self.tags[idx] != Some(tag) {
                    return Err(Error::TaggedSlotInvariant {
                        index: idx,
                        stored: self.tags[idx],
                        expected: tag,
                    });
                }
            },
            IndexMode::Global | IndexMode::GShare => {
                self.ghr.push(outcome);
            },
            IndexMode::Untagged => {},
        }
        self.get_entry_mut(idx).update(outcome);
        Ok(())
    }
}
