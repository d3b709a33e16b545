//! Types for representing branches and branch outcomes.

use std::collections::*;

/// A physical instruction address.
pub type Addr = u32;

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::T => "t",
            Self::N => "n",
        };
        write!(f, "{}", s)
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        matches!(x, Outcome::T)
    }
}

/// A branch or jump instruction decoded from a disassembly listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchInstruction {
    /// The (physical) address of this instruction
    pub addr: Addr,

    /// The mnemonic, ie. `beq`, `bnez`, `jal`
    pub op: String,

    /// The statically-decoded target address
    pub tgt: Addr,
}
impl BranchInstruction {
    pub fn new(addr: Addr, op: impl Into<String>, tgt: Addr) -> Self {
        Self { addr, op: op.into(), tgt }
    }

    /// Returns 'true' if the target is at or before this instruction.
    pub fn is_backward(&self) -> bool {
        self.tgt <= self.addr
    }
}

/// Branch instructions keyed by their own address.
pub type BranchMap = BTreeMap<Addr, BranchInstruction>;
