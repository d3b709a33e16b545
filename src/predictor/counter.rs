//! Implementation of a saturating counter.

use crate::branch::Outcome;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// The largest value (ie. "strongly taken")
    pub max: u8,

    /// Values above this predict 'taken'
    pub threshold: u8,

    /// The initial value
    pub init: u8,
}
impl SaturatingCounterConfig {
    /// A 2-bit counter starting at "strongly not-taken".
    pub const TWO_BIT: Self = Self { max: 3, threshold: 1, init: 0 };

    pub fn storage_bits(&self) -> usize {
        (u8::BITS - self.max.leading_zeros()) as usize
    }
    pub fn build(self) -> SaturatingCounter {
        assert!(self.init <= self.max && self.threshold < self.max);
        SaturatingCounter { cfg: self, ctr: self.init }
    }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounter {
    cfg: SaturatingCounterConfig,
    ctr: u8,
}
impl SaturatingCounter {
    pub fn inc(&mut self) { self.ctr = (self.ctr + 1).min(self.cfg.max); }
    pub fn dec(&mut self) { self.ctr = self.ctr.saturating_sub(1); }

    pub fn value(&self) -> u8 { self.ctr }

    /// Set the counter to some value (clamped to the range of the counter).
    pub fn set(&mut self, val: u8) {
        self.ctr = val.min(self.cfg.max);
    }

    /// Reset the counter.
    pub fn reset(&mut self) {
        self.ctr = self.cfg.init;
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from(self.ctr > self.cfg.threshold)
    }

    /// Move toward "strongly taken" or "strongly not-taken".
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.inc(),
            Outcome::N => self.dec(),
        }
    }
}
