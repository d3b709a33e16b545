//! Implementations of different branch predictors.

pub mod table;
pub mod simple;
pub mod pht;
pub mod counter;

pub use table::*;
pub use simple::*;
pub use pht::*;
pub use counter::*;

use std::str::FromStr;
use crate::branch::*;
use crate::error::*;

/// Interface to a branch predictor.
///
/// For each execution of a branch, [Predictor::predict] is called first and
/// [Predictor::update] exactly once afterwards with the resolved outcome.
pub trait Predictor {
    fn name(&self) -> &'static str;

    /// Return the predicted outcome for this execution of the branch.
    ///
    /// Only tagged tables change state here (allocating a slot on a miss).
    fn predict(&mut self, inst: &BranchInstruction) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, inst: &BranchInstruction, outcome: Outcome)
        -> Result<()>;
}

/// The closed set of predictors that can be evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorKind {
    AlwaysTaken,
    AlwaysNotTaken,
    BackwardTaken,
    Counter(IndexMode, TableSize),
}
impl PredictorKind {
    /// Every predictor, in reporting order.
    pub fn all() -> Vec<Self> {
        let mut res = vec![
            Self::AlwaysTaken,
            Self::AlwaysNotTaken,
            Self::BackwardTaken,
        ];
        for mode in IndexMode::ALL {
            for size in TableSize::ALL {
                res.push(Self::Counter(mode, size));
            }
        }
        res
    }

    pub fn name(&self) -> &'static str {
        use IndexMode::*;
        use TableSize::*;
        match self {
            Self::AlwaysTaken    => "always-taken",
            Self::AlwaysNotTaken => "always-not-taken",
            Self::BackwardTaken  => "btfnt",
            Self::Counter(Tagged, S64)    => "tagged-64",
            Self::Counter(Tagged, S128)   => "tagged-128",
            Self::Counter(Tagged, S256)   => "tagged-256",
            Self::Counter(Untagged, S64)  => "untagged-64",
            Self::Counter(Untagged, S128) => "untagged-128",
            Self::Counter(Untagged, S256) => "untagged-256",
            Self::Counter(Global, S64)    => "ght-64",
            Self::Counter(Global, S128)   => "ght-128",
            Self::Counter(Global, S256)   => "ght-256",
            Self::Counter(GShare, S64)    => "gshare-64",
            Self::Counter(GShare, S128)   => "gshare-128",
            Self::Counter(GShare, S256)   => "gshare-256",
        }
    }

    /// Create a predictor with fresh state.
    pub fn build(&self) -> Box<dyn Predictor> {
        match self {
            Self::AlwaysTaken    => Box::new(TakenPredictor),
            Self::AlwaysNotTaken => Box::new(NotTakenPredictor),
            Self::BackwardTaken  => Box::new(BackwardTakenPredictor),
            Self::Counter(mode, size) => {
                Box::new(PatternHistoryTable::new(*mode, *size))
            },
        }
    }
}

impl std::fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PredictorKind {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all().into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown predictor '{}'", s))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn names_round_trip() {
        let all = PredictorKind::all();
        assert_eq!(all.len(), 15);
        for kind in all {
            assert_eq!(kind.name().parse::<PredictorKind>().unwrap(), kind);
            assert_eq!(kind.build().name(), kind.name());
        }
    }

    #[test]
    fn unknown_name() {
        assert!("tagged-512".parse::<PredictorKind>().is_err());
        assert!("".parse::<PredictorKind>().is_err());
    }
}
