//! Perft suites loaded from TOML files.
//!
//! A suite lists positions with the node count expected at a given depth:
//!
//! ```toml
//! [[positions]]
//! name = "kiwipete"
//! fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
//! depth = 2
//! nodes = 2039
//! ```

use movegen::{perft, Position, PositionError};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading or running a suite.
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Failed to read the suite file from disk.
    #[error("Failed to read suite file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the suite file as valid TOML.
    #[error("Failed to parse suite: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A suite entry could not be set up or counted.
    #[error("Position '{name}': {source}")]
    Position {
        name: String,
        #[source]
        source: PositionError,
    },
    /// One or more entries produced the wrong count.
    #[error("{failed} of {total} suite positions gave the wrong node count")]
    Mismatch { failed: usize, total: usize },
}

/// One position of a suite.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SuiteEntry {
    pub name: String,
    pub fen: String,
    pub depth: u32,
    /// Expected leaf count at `depth`.
    pub nodes: u64,
}

#[derive(Debug, Deserialize, Default)]
pub struct Suite {
    #[serde(default)]
    pub positions: Vec<SuiteEntry>,
}

/// The result of counting one suite entry.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub entry: SuiteEntry,
    pub found: u64,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.found == self.entry.nodes
    }
}

impl Suite {
    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SuiteError> {
        Ok(toml::from_str(content)?)
    }

    /// Counts every entry, in file order.
    pub fn run(&self) -> Result<Vec<Outcome>, SuiteError> {
        self.positions.iter().map(run_entry).collect()
    }
}

fn run_entry(entry: &SuiteEntry) -> Result<Outcome, SuiteError> {
    let wrap = |source| SuiteError::Position {
        name: entry.name.clone(),
        source,
    };
    let mut position = Position::from_fen(&entry.fen).map_err(wrap)?;
    let start = Instant::now();
    let found = perft(&mut position, entry.depth).map_err(wrap)?;
    let elapsed = start.elapsed();
    debug!(name = %entry.name, depth = entry.depth, found, ?elapsed, "suite entry");
    Ok(Outcome {
        entry: entry.clone(),
        found,
        elapsed,
    })
}

/// Fails with [`SuiteError::Mismatch`] unless every outcome passed.
pub fn verify(outcomes: &[Outcome]) -> Result<(), SuiteError> {
    let failed = outcomes.iter().filter(|o| !o.passed()).count();
    if failed > 0 {
        return Err(SuiteError::Mismatch {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}
