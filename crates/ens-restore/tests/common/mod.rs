#![allow(dead_code)]

use std::io::{Read, Write};

use ens_core::errors::ErrorInfo;
use ens_core::{EnsError, Logger};
use ens_restore::restorable::{self, Restorable, RestorableSimulation};
use serde::{Deserialize, Serialize};

/// One executed trial as seen by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub index: u64,
    pub total: u64,
    pub seed: u64,
}

impl TrialRecord {
    pub fn new(index: u64, total: u64, seed: u64) -> Self {
        Self { index, total, seed }
    }
}

/// Simulation that records every trial it performs, with an optional trial
/// index at which it fails, mimicking a killed worker.
#[derive(Debug, Default)]
pub struct RecordingSimulation {
    seed: u64,
    interrupt_on: Option<u64>,
    pub trials: Vec<TrialRecord>,
}

impl RecordingSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interrupting_at(index: u64) -> Self {
        Self {
            interrupt_on: Some(index),
            ..Self::default()
        }
    }
}

impl Restorable for RecordingSimulation {
    fn store_state(&self, out: &mut dyn Write) -> Result<(), EnsError> {
        restorable::store_vector(&self.trials, out)
    }

    fn join_restored_state(&mut self, input: &mut dyn Read) -> Result<(), EnsError> {
        restorable::join_vector(&mut self.trials, input)
    }

    fn clear(&mut self) {
        self.trials.clear();
    }
}

impl RestorableSimulation for RecordingSimulation {
    fn seed_random_generators(&mut self, seed: u64) {
        self.seed = seed;
    }

    fn perform_simulation(
        &mut self,
        index: u64,
        total: u64,
        _logger: &mut dyn Logger,
    ) -> Result<(), EnsError> {
        if self.interrupt_on == Some(index) {
            return Err(EnsError::Trial(
                ErrorInfo::new("trial-interrupted", "interruption")
                    .with_context("index", index.to_string()),
            ));
        }
        self.trials.push(TrialRecord::new(index, total, self.seed));
        Ok(())
    }

    fn tag_name(&self) -> &str {
        "recording"
    }
}

/// Number of entries currently in a directory.
pub fn dir_entry_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
