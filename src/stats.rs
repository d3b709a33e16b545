//! Helpers for collecting statistics.

use std::collections::*;
use bitvec::prelude::*;
use itertools::*;
use crate::branch::*;

/// Counts of resolved outcomes and correct predictions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccuracyTally {
    /// Number of 'not-taken' branch events
    pub not_taken: usize,

    /// Number of 'taken' branch events
    pub taken: usize,

    /// Number of correct predictions
    pub correct: usize,
}
impl AccuracyTally {
    pub fn new() -> Self { Self::default() }

    /// Record the resolved outcome of a branch and the predicted outcome.
    pub fn record(&mut self, outcome: Outcome, prediction: Outcome) {
        match outcome {
            Outcome::T => self.taken += 1,
            Outcome::N => self.not_taken += 1,
        }
        if outcome == prediction {
            self.correct += 1;
        }
    }

    /// Return the total number of branch events.
    pub fn total(&self) -> usize { self.taken + self.not_taken }

    /// Return the number of incorrect predictions.
    pub fn misses(&self) -> usize { self.total() - self.correct }

    /// Return the fraction of correct predictions, or `None` when no
    /// branches were recorded.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            n => Some(self.correct as f64 / n as f64),
        }
    }
}

impl std::ops::AddAssign for AccuracyTally {
    fn add_assign(&mut self, rhs: Self) {
        self.not_taken += rhs.not_taken;
        self.taken += rhs.taken;
        self.correct += rhs.correct;
    }
}

impl std::iter::Sum for AccuracyTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut acc, x| { acc += x; acc })
    }
}

/// Container for recording statistics while evaluating some predictor.
pub struct BranchStats {
    /// Per-branch statistics (indexed by branch address).
    pub data: BTreeMap<Addr, BranchData>,

    /// Global counts
    pub tally: AccuracyTally,
}
impl BranchStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            tally: AccuracyTally::new(),
        }
    }

    /// Update global and per-branch statistics.
    pub fn update(&mut self, pc: Addr, outcome: Outcome, prediction: Outcome) {
        self.tally.record(outcome, prediction);
        let data = self.get_mut(pc);
        data.occ += 1;
        data.pat.push(outcome.into());
        if outcome == prediction { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: Addr) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: Addr) -> &mut BranchData {
        self.data.entry(pc).or_insert_with(BranchData::new)
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns up to 'n' of the most frequently executed branches with a poor
    /// hit rate.
    pub fn get_low_rate_branches(&self, n: usize) -> Vec<(Addr, &BranchData)> {
        self.data.iter()
            .filter(|(_, s)| s.occ > 100 && s.hit_rate() <= 0.55)
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

impl Default for BranchStats {
    fn default() -> Self { Self::new() }
}

/// Container for per-branch statistics.
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}
impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            hits: 0,
            pat: BitVec::new(),
        }
    }

    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn times_taken(&self) -> usize {
        self.pat.count_ones()
    }

    /// Return the most recent outcomes as a string (oldest first).
    pub fn recent_pattern(&self, n: usize) -> String {
        let start = self.pat.len().saturating_sub(n);
        self.pat[start..].iter().by_vals()
            .map(|b| if b { 't' } else { 'n' })
            .collect()
    }
}

impl Default for BranchData {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tally_counts() {
        let mut t = AccuracyTally::new();
        assert_eq!(t.accuracy(), None);
        t.record(Outcome::T, Outcome::T);
        t.record(Outcome::N, Outcome::T);
        t.record(Outcome::N, Outcome::N);
        t.record(Outcome::T, Outcome::N);
        assert_eq!(t, AccuracyTally { not_taken: 2, taken: 2, correct: 2 });
        assert_eq!(t.misses(), 2);
        assert_eq!(t.accuracy(), Some(0.5));
    }

    #[test]
    fn tally_sum() {
        let a = AccuracyTally { not_taken: 0, taken: 1, correct: 1 };
        let b = AccuracyTally { not_taken: 3, taken: 0, correct: 0 };
        let sum: AccuracyTally = [a, b].into_iter().sum();
        assert_eq!(sum, AccuracyTally { not_taken: 3, taken: 1, correct: 1 });
        assert_eq!(sum.accuracy(), Some(0.25));
    }

    #[test]
    fn per_branch() {
        let mut stats = BranchStats::new();
        for i in 0..200 {
            let outcome = Outcome::from(i % 2 == 0);
            stats.update(0x10, outcome, Outcome::T);
            stats.update(0x20, Outcome::T, Outcome::T);
        }
        stats.update(0x30, Outcome::N, Outcome::T);

        assert_eq!(stats.num_unique_branches(), 3);
        assert_eq!(stats.tally.total(), 401);
        let d = stats.get(0x10).unwrap();
        assert_eq!((d.occ, d.hits, d.times_taken()), (200, 100, 100));
        assert_eq!(d.recent_pattern(4), "tntn");

        let low = stats.get_low_rate_branches(8);
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].0, 0x10);
    }
}
