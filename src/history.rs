
use bitvec::prelude::*;
use crate::branch::Outcome;

/// A register of the most recent branch outcomes, shared by every branch
/// presented to the predictor that owns it.
///
/// Bit 0 is the most recent outcome.
#[derive(Clone, Debug)]
pub struct GlobalHistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the oldest outcome and the rightmost bit is the
// most recent outcome (index 0).
impl std::fmt::Display for GlobalHistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl GlobalHistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }

    /// Shift in a new outcome. The oldest outcome is discarded.
    pub fn push(&mut self, outcome: Outcome) {
        self.data.shift_right(1);
        self.data.set(0, outcome.into());
    }

    /// Return the most recent outcome.
    pub fn last(&self) -> Outcome {
        Outcome::from(self.data[0])
    }

    /// Fold [with XOR] the whole register into 'output_bits' bits.
    pub fn fold(&self, output_bits: usize) -> usize {
        assert!(output_bits > 0 && output_bits < usize::BITS as usize);
        let output_mask = (1 << output_bits) - 1;
        let res = self.data.chunks(output_bits).fold(0, |res, x| {
            res ^ x.load_le::<usize>()
        });
        res & output_mask
    }
}
