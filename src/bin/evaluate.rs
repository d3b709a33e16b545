//! Evaluate branch predictors against a suite of benchmark traces.

use std::path::PathBuf;
use anyhow::bail;
use clap::Parser;
use bpeval::*;

#[derive(Parser)]
#[command(name = "evaluate", about = "Evaluate branch predictors on benchmark traces")]
struct Args {
    /// Directory containing one directory per benchmark
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Predictor to evaluate (may be repeated; default: all of them)
    #[arg(short, long = "predictor")]
    predictors: Vec<PredictorKind>,

    /// Benchmark to evaluate (may be repeated; default: the standard suite)
    #[arg(short, long = "benchmark")]
    benchmarks: Vec<String>,

    /// Also list up to N frequently executed branches with a poor hit rate
    #[arg(long, default_value_t = 0)]
    low_rate: usize,

    /// List the available predictors and exit
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")
    ).init();
    let args = Args::parse();

    if args.list {
        for kind in PredictorKind::all() {
            println!("{}", kind);
        }
        return Ok(());
    }

    let predictors = if args.predictors.is_empty() {
        PredictorKind::all()
    } else {
        args.predictors
    };
    let benchmarks = if args.benchmarks.is_empty() {
        BENCHMARK_SUITE.iter().map(|s| s.to_string()).collect()
    } else {
        args.benchmarks
    };

    let mut failed = 0;
    for kind in predictors {
        let res = evaluate_suite(kind, &args.root, &benchmarks);
        print!("{}", res);
        failed += res.num_failed();

        if args.low_rate == 0 { continue; }
        for bench in &res.benchmarks {
            let Ok(stats) = &bench.stats else { continue };
            for (pc, s) in stats.get_low_rate_branches(args.low_rate) {
                println!("    {:15}{:08x}: {:6}/{:6} ({:.4}) {}",
                    bench.name, pc, s.hits, s.occ, s.hit_rate(),
                    s.recent_pattern(64));
            }
        }
    }

    if failed != 0 {
        bail!("{} benchmark run(s) failed", failed);
    }
    Ok(())
}
