//! Evaluating predictors against benchmark traces.

use std::path::Path;
use log::{ debug, trace, warn };

use crate::error::*;
use crate::predictor::*;
use crate::stats::*;
use crate::trace::BenchmarkTrace;

/// The default set of benchmarks (in reporting order).
pub const BENCHMARK_SUITE: [&str; 10] = [
    "bitcount", "bubble_sort", "coremark", "crc32", "dhrystone",
    "quick_sort", "select_sort", "sha", "stream_copy", "stringsearch",
];

/// Evaluate a predictor over all of the branch events in a trace.
pub fn run_benchmark(p: &mut dyn Predictor, trace: &BenchmarkTrace)
    -> Result<BranchStats>
{
    let mut stats = BranchStats::new();
    for event in trace.events() {
        let prediction = p.predict(event.inst);
        trace!("{:08x} {:6} pred={:?} outcome={:?}",
            event.inst.addr, event.inst.op, prediction, event.outcome);
        stats.update(event.inst.addr, event.outcome, prediction);
        p.update(event.inst, event.outcome)?;
    }
    if stats.tally.total() == 0 {
        return Err(Error::NoBranchEvents(trace.name().to_string()));
    }
    debug!("{} on {}: {}/{} correct", p.name(), trace.name(),
        stats.tally.correct, stats.tally.total());
    Ok(stats)
}

/// The outcome of evaluating a predictor on a single benchmark.
pub struct BenchmarkResult {
    pub name: String,
    pub stats: Result<BranchStats>,
}

/// The outcome of evaluating a predictor on a whole suite of benchmarks.
pub struct SuiteResult {
    pub predictor: PredictorKind,
    pub benchmarks: Vec<BenchmarkResult>,
}
impl SuiteResult {
    /// Sum of the tallies of every benchmark that completed.
    pub fn aggregate(&self) -> AccuracyTally {
        self.benchmarks.iter()
            .filter_map(|b| b.stats.as_ref().ok())
            .map(|s| s.tally)
            .sum()
    }

    /// Suite-wide accuracy, weighted by the number of branch events in each
    /// benchmark.
    pub fn accuracy(&self) -> Result<f64> {
        self.aggregate().accuracy().ok_or_else(|| {
            Error::NoBranchEvents(self.predictor.name().to_string())
        })
    }

    /// Returns the number of benchmarks that failed.
    pub fn num_failed(&self) -> usize {
        self.benchmarks.iter().filter(|b| b.stats.is_err()).count()
    }
}

impl std::fmt::Display for SuiteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "[*] {}", self.predictor)?;
        for bench in &self.benchmarks {
            match bench.stats.as_ref().map(|s| (s.tally, s.tally.accuracy())) {
                Ok((tally, Some(acc))) => {
                    writeln!(f, "{:15}{:5.2}%, [{}, {}]", bench.name,
                        100.0 * acc, tally.not_taken, tally.taken)?;
                },
                Ok((_, None)) => {
                    writeln!(f, "{:15}error: no branch events", bench.name)?;
                },
                Err(e) => writeln!(f, "{:15}error: {}", bench.name, e)?,
            }
        }
        match self.accuracy() {
            Ok(acc) => writeln!(f, "{:15}{:5.2}%", "(avg.)", 100.0 * acc),
            Err(e) => writeln!(f, "{:15}error: {}", "(avg.)", e),
        }
    }
}

/// Evaluate a fresh instance of a predictor on each of the given traces.
pub fn evaluate_traces(kind: PredictorKind, traces: &[BenchmarkTrace])
    -> SuiteResult
{
    let benchmarks = traces.iter().map(|trace| {
        let mut p = kind.build();
        BenchmarkResult {
            name: trace.name().to_string(),
            stats: run_benchmark(p.as_mut(), trace),
        }
    }).collect();
    SuiteResult { predictor: kind, benchmarks }
}

/// Load each benchmark from 'root' and evaluate a fresh instance of a
/// predictor on it. A failing benchmark doesn't affect the others.
pub fn evaluate_suite<S: AsRef<str>>(kind: PredictorKind, root: &Path,
    names: &[S]) -> SuiteResult
{
    let benchmarks = names.iter().map(|name| {
        let name = name.as_ref();
        let stats = BenchmarkTrace::load(root, name).and_then(|trace| {
            let mut p = kind.build();
            run_benchmark(p.as_mut(), &trace)
        });
        if let Err(e) = &stats {
            warn!("{} on {}: {}", kind, name, e);
        }
        BenchmarkResult { name: name.to_string(), stats }
    }).collect();
    SuiteResult { predictor: kind, benchmarks }
}
