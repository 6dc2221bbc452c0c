#![deny(missing_docs)]

//! Checkpointed, resumable ensemble simulations coordinated through files in
//! a shared directory.
//!
//! A workload of `total` independent trials may be carved into disjoint spans
//! owned by separately launched worker processes. Each worker checkpoints its
//! accumulator state after every trial, resumes from the checkpoint after an
//! interruption, and, once its own span is done, scans the working directory
//! for sibling state files. The worker that observes every span present and
//! finished merges all partial states into one result and removes the files.
//! There is no lock service and no network; the directory listing is the only
//! coordination medium.

/// Binary checkpoint framing: header plus opaque restorable payload.
pub mod checkpoint;
/// Classification of discovered spans against the full trial range.
pub mod coverage;
/// Public executor facade: resume engine and merge engine.
pub mod executor;
/// Restorable capability traits and state-joining helpers.
pub mod restorable;
/// Restorable scalar-sample accumulator.
pub mod series;
/// State file naming convention and sibling discovery.
pub mod state_file;

pub use checkpoint::{
    absorb_payload, peek_header, read_checkpoint, write_checkpoint, CheckpointHeader,
};
pub use coverage::{classify, StateFilesCoverage};
pub use executor::SimulationExecutor;
pub use restorable::{Restorable, RestorableSimulation};
pub use series::{MeanAndError, SeriesAccumulator};
pub use state_file::{
    discover_siblings, state_file_name, state_file_path, SiblingFile, StateFilePattern,
};
