//! Extracting branch instructions and committed program counters from the
//! two textual artifacts recorded for each benchmark.
//!
//! For some benchmark `T`, the files are expected at:
//!
//! - `T/T.si`: the disassembly listing
//! - `T/T.txt`: the commit log (`<pc>,<wen>,<reg>,<data>` records)

use std::path::{ Path, PathBuf };
use std::sync::OnceLock;
use itertools::*;
use log::info;
use regex::Regex;

use crate::addr::translate;
use crate::branch::*;
use crate::error::*;
use crate::events::BranchEvents;

static DISASM_PATTERN: OnceLock<Regex> = OnceLock::new();
static COMMIT_PATTERN: OnceLock<Regex> = OnceLock::new();

/// `<addr>: <encoding>  <b*|j*> ... <target>`
fn disasm_pattern() -> &'static Regex {
    DISASM_PATTERN.get_or_init(|| {
        Regex::new(r"([0-9a-f]{8}):\s[0-9a-f]{8}\s+([bj][a-z]*).+([0-9a-f]{8})")
            .unwrap()
    })
}

/// `<pc>,<wen>,<reg>,<data>`
fn commit_pattern() -> &'static Regex {
    COMMIT_PATTERN.get_or_init(|| {
        Regex::new(r"([0-9a-f]{8}),[0-9a-f],[0-9a-f]{2},[0-9a-f]{8}").unwrap()
    })
}

/// Collect all branch/jump instructions from a disassembly listing.
///
/// When an address appears more than once, the last occurrence wins.
pub fn parse_disassembly(text: &str) -> Result<BranchMap> {
    let mut res = BranchMap::new();
    for cap in disasm_pattern().captures_iter(text) {
        let addr = translate(&cap[1])?;
        let tgt  = translate(&cap[3])?;
        res.insert(addr, BranchInstruction::new(addr, &cap[2], tgt));
    }
    Ok(res)
}

/// Collect the sequence of committed program counter values from a commit
/// log, with immediate repeats collapsed.
pub fn parse_commit_log(text: &str) -> Result<Vec<Addr>> {
    let pcs: Vec<Addr> = commit_pattern().captures_iter(text)
        .map(|cap| translate(&cap[1]))
        .collect::<Result<_>>()?;
    Ok(collapse_repeats(pcs))
}

/// Drop any value equal to the one immediately before it.
///
/// A single committed instruction may be logged several times in a row
/// (once per register write).
pub fn collapse_repeats(pcs: impl IntoIterator<Item = Addr>) -> Vec<Addr> {
    pcs.into_iter().dedup().collect()
}

/// Read a whole trace file into memory.
fn read_trace(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| {
        Error::MalformedTrace { path: path.to_path_buf(), source }
    })
}

/// The parsed traces for a single benchmark.
#[derive(Clone, Debug)]
pub struct BenchmarkTrace {
    name: String,
    branches: BranchMap,
    pcs: Vec<Addr>,
}
impl BenchmarkTrace {
    pub fn new(name: impl Into<String>, branches: BranchMap, pcs: Vec<Addr>)
        -> Self
    {
        Self { name: name.into(), branches, pcs }
    }

    /// Path to the disassembly listing for benchmark `name` under `root`.
    pub fn disasm_path(root: &Path, name: &str) -> PathBuf {
        root.join(name).join(format!("{}.si", name))
    }

    /// Path to the commit log for benchmark `name` under `root`.
    pub fn commit_log_path(root: &Path, name: &str) -> PathBuf {
        root.join(name).join(format!("{}.txt", name))
    }

    /// Load and parse both traces for benchmark `name` under `root`.
    pub fn load(root: &Path, name: &str) -> Result<Self> {
        let disasm = read_trace(&Self::disasm_path(root, name))?;
        let commit = read_trace(&Self::commit_log_path(root, name))?;
        let branches = parse_disassembly(&disasm)?;
        let pcs = parse_commit_log(&commit)?;
        info!("{}: {} branch instructions, {} committed pcs",
            name, branches.len(), pcs.len());
        Ok(Self::new(name, branches, pcs))
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn branches(&self) -> &BranchMap { &self.branches }
    pub fn pcs(&self) -> &[Addr] { &self.pcs }

    /// Returns a fresh iterator over the branch events in this trace.
    pub fn events(&self) -> BranchEvents<'_> {
        BranchEvents::new(&self.branches, &self.pcs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DISASM: &str = "\
80000000 <_start>:
80000000:\t3c1d8000 \tlui\tsp,0x8000
80000004:\t1000000a \tb\t80000030 <_start+0x30>
80000008:\t00000000 \tnop
8000000c:\t0c000020 \tjal\t80000080 <main>
80000010:\t1440fffb \tbnez\tv0,a0000000 <_start>
80000014:\t03e00008 \tjr\tra
";

    #[test]
    fn disassembly_branches() {
        let map = parse_disassembly(DISASM).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&0x04], BranchInstruction::new(0x04, "b", 0x30));
        assert_eq!(map[&0x0c], BranchInstruction::new(0x0c, "jal", 0x80));
        assert_eq!(map[&0x10], BranchInstruction::new(0x10, "bnez", 0x00));
        // No target on the line
        assert!(!map.contains_key(&0x14));
    }

    #[test]
    fn disassembly_last_write_wins() {
        let text = "\
80000004:\t1000000a \tbeq\tzero,zero,80000030 <a>
80000004:\t1000000b \tbne\tzero,at,80000040 <b>
";
        let map = parse_disassembly(text).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map[&0x04], BranchInstruction::new(0x04, "bne", 0x40));
    }

    #[test]
    fn disassembly_bad_target() {
        let text = "80000004:\t1000000a \tb\t00001000 <_start+0x30>\n";
        assert!(matches!(parse_disassembly(text), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn commit_log_collapse() {
        let text = "\
80000000,1,1d,80000000
80000004,0,00,00000000
80000004,1,02,00000001
a0000008,1,03,00000002
core 0: garbage line
8000000c,1,04,00000003
80000004,1,02,00000001
";
        let pcs = parse_commit_log(text).unwrap();
        assert_eq!(pcs, vec![0x00, 0x04, 0x08, 0x0c, 0x04]);
    }

    #[test]
    fn commit_log_collapses_after_translation() {
        let text = "80000010,1,01,00000000\na0000010,1,01,00000000\n";
        assert_eq!(parse_commit_log(text).unwrap(), vec![0x10]);
    }

    #[test]
    fn commit_log_bad_pc() {
        let text = "80000000,1,1d,80000000\n00400000,1,1d,80000000\n";
        assert!(matches!(parse_commit_log(text), Err(Error::InvalidAddress(_))));
    }

    #[test]
    fn collapse_idempotent() {
        let once = collapse_repeats([1, 1, 2, 3, 3, 3, 1, 2, 2]);
        assert_eq!(once, vec![1, 2, 3, 1, 2]);
        assert_eq!(collapse_repeats(once.clone()), once);
        assert_eq!(collapse_repeats([]), vec![]);
    }

    #[test]
    fn load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchmarkTrace::load(dir.path(), "sha").unwrap_err();
        match err {
            Error::MalformedTrace { path, .. } => {
                assert_eq!(path, dir.path().join("sha").join("sha.si"));
            },
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let bench = dir.path().join("crc32");
        std::fs::create_dir(&bench).unwrap();
        std::fs::write(bench.join("crc32.si"), DISASM).unwrap();
        std::fs::write(bench.join("crc32.txt"),
            "80000000,1,1d,80000000\n80000004,0,00,00000000\n").unwrap();

        let trace = BenchmarkTrace::load(dir.path(), "crc32").unwrap();
        assert_eq!(trace.name(), "crc32");
        assert_eq!(trace.branches().len(), 3);
        assert_eq!(trace.pcs(), &[0x00, 0x04]);
    }
}
