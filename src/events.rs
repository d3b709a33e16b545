//! Recovering branch outcomes from the committed program counter sequence.

use crate::branch::*;

/// Distance from a branch to the instruction that follows its delay slot.
///
/// The branch commits at `i`, its delay slot at `i + 1`, and the next
/// instruction on the resolved path at `i + 2`.
pub const DELAY_SLOT_LOOKAHEAD: usize = 2;

/// A single execution of a branch instruction, with the observed outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchEvent<'a> {
    pub inst: &'a BranchInstruction,
    pub outcome: Outcome,
}

/// Iterator over the [BranchEvent]s found in a committed PC sequence.
///
/// A branch is 'taken' when the PC after its delay slot equals the static
/// target. Indirect jumps are scored against the decoded target as well.
/// Branches too close to the end of the sequence are skipped.
pub struct BranchEvents<'a> {
    branches: &'a BranchMap,
    pcs: &'a [Addr],
    cursor: usize,
}
impl<'a> BranchEvents<'a> {
    pub fn new(branches: &'a BranchMap, pcs: &'a [Addr]) -> Self {
        Self { branches, pcs, cursor: 0 }
    }
}

impl<'a> Iterator for BranchEvents<'a> {
    type Item = BranchEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (branches, pcs) = (self.branches, self.pcs);
        while let Some(next_pc) = pcs.get(self.cursor + DELAY_SLOT_LOOKAHEAD) {
            let pc = pcs[self.cursor];
            self.cursor += 1;
            if let Some(inst) = branches.get(&pc) {
                let outcome = Outcome::from(inst.tgt == *next_pc);
                return Some(BranchEvent { inst, outcome });
            }
        }
        self.cursor = self.pcs.len();
        None
    }
}
