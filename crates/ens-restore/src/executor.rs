use std::fs;
use std::path::{Path, PathBuf};

use ens_core::errors::ErrorInfo;
use ens_core::{EnsError, Logger, SimulationSpan};

use crate::checkpoint::{self, CheckpointHeader};
use crate::coverage::{self, StateFilesCoverage};
use crate::restorable::RestorableSimulation;
use crate::state_file::{self, SiblingFile, StateFilePattern};

/// Executes a span of trials with per-trial checkpointing and crash recovery.
///
/// In non-split mode the executor owns the whole `[0, total)` range: after an
/// uninterrupted run it deletes its state file and the result is ready to
/// save. In split mode several executors, each owning a disjoint span but
/// sharing the signature (up to the embedded span tokens), the working
/// directory and the seed, coordinate purely through state files: whichever
/// worker finishes last observes full, finished coverage, merges every
/// partial state into its own simulation and removes all files.
///
/// The merge protocol reads the directory, merges and then deletes without
/// any lock or atomic rename. Two workers finishing at nearly the same moment
/// can therefore both observe complete coverage and both merge; the caller is
/// expected to launch spans so that this window is irrelevant.
#[derive(Debug)]
pub struct SimulationExecutor {
    span: SimulationSpan,
    signature: String,
    split_workload: bool,
    working_dir: PathBuf,
    should_save: bool,
}

impl SimulationExecutor {
    /// Creates an executor for the given span after validating it.
    ///
    /// `signature` must embed this worker's `from.{from}` and `to.{to}`
    /// tokens when `split_workload` is set, since sibling discovery
    /// generalizes exactly those tokens.
    pub fn new(
        span: SimulationSpan,
        signature: impl Into<String>,
        split_workload: bool,
        working_dir: impl Into<PathBuf>,
    ) -> Result<Self, EnsError> {
        span.validate()?;
        Ok(Self {
            span,
            signature: signature.into(),
            split_workload,
            working_dir: working_dir.into(),
            should_save: false,
        })
    }

    /// Whether the last [`perform_simulations`](Self::perform_simulations)
    /// call produced a complete, mergeable result worth saving.
    ///
    /// Meaningful only after `perform_simulations` returned without error.
    pub fn should_save_simulation(&self) -> bool {
        self.should_save
    }

    /// Runs (or resumes) all trials of this executor's span.
    ///
    /// If a state file for the span exists, the simulation state is restored
    /// from it and execution continues after the last completed index;
    /// otherwise the simulation is cleared and execution starts at the span
    /// beginning. The random generators are seeded exactly once, with
    /// `seed + start`, where `start` is the absolute index of the first trial
    /// this invocation performs. A resumed run therefore reproduces the same
    /// trial/seed pairing an uninterrupted run would have produced from
    /// `start` onward.
    ///
    /// After every trial the checkpoint is rewritten, so an interruption
    /// loses at most the trial in flight. A trial failure propagates
    /// unchanged and leaves the checkpoint of the previous trial on disk.
    pub fn perform_simulations(
        &mut self,
        simulation: &mut dyn RestorableSimulation,
        seed: u64,
        logger: &mut dyn Logger,
    ) -> Result<(), EnsError> {
        self.should_save = false;
        let path =
            state_file::state_file_path(&self.working_dir, &self.signature, simulation.tag_name());

        let start = if path.exists() {
            let header = checkpoint::read_checkpoint(&path, simulation)?;
            self.check_resume_index(&header, &path)?;
            logger.info(&format!(
                "State file found, resuming simulations from index {}",
                header.next_index + 1
            ));
            header.next_index + 1
        } else {
            simulation.clear();
            logger.info("No state file found, starting simulations from scratch");
            self.span.from
        };

        simulation.seed_random_generators(seed.wrapping_add(start));
        for index in start..self.span.to {
            simulation.perform_simulation(index, self.span.total, logger)?;
            let finished = index + 1 == self.span.to;
            checkpoint::write_checkpoint(&path, finished, index, simulation)?;
        }

        if self.split_workload {
            self.merge_state_files(simulation, logger)?;
        } else {
            remove_state_file(&path)?;
            self.should_save = true;
        }
        Ok(())
    }

    /// Validates the restored index against this executor's span.
    ///
    /// The record describes the last *completed* index. In non-split mode a
    /// finished span has no state file at all (it is deleted on completion),
    /// so the index must leave at least one trial to run. In split mode the
    /// file of a finished span is kept for the merge, so the final index is
    /// legal as well.
    fn check_resume_index(
        &self,
        header: &CheckpointHeader,
        path: &Path,
    ) -> Result<(), EnsError> {
        let next = header.next_index;
        let upper_ok = if self.split_workload {
            next.saturating_add(1) <= self.span.to
        } else {
            next.saturating_add(2) <= self.span.to
        };
        if next < self.span.from || !upper_ok {
            return Err(EnsError::Checkpoint(
                ErrorInfo::new(
                    "resume-index-range",
                    "restored simulation index does not fit the simulation span",
                )
                .with_context("path", path.display().to_string())
                .with_context("next_index", next.to_string())
                .with_context("from", self.span.from.to_string())
                .with_context("to", self.span.to.to_string())
                .with_hint("the state file belongs to a different span; remove it manually"),
            ));
        }
        Ok(())
    }

    /// Attempts to merge sibling state files after this span completed.
    ///
    /// Incomplete or broken coverage and interrupted siblings are expected
    /// intermediate states, reported through the logger and through
    /// [`should_save_simulation`](Self::should_save_simulation) staying
    /// false; they are never errors. Files are only ever deleted on a full
    /// merge, broken layouts are left for manual cleanup.
    fn merge_state_files(
        &mut self,
        simulation: &mut dyn RestorableSimulation,
        logger: &mut dyn Logger,
    ) -> Result<(), EnsError> {
        let pattern = StateFilePattern::new(
            &self.signature,
            self.span.from,
            self.span.to,
            simulation.tag_name(),
        )?;
        let siblings = state_file::discover_siblings(&self.working_dir, &pattern)?;
        match coverage::classify(&siblings, self.span.total) {
            StateFilesCoverage::Broken => {
                logger.info("State files have broken ranges, they have to be fixed manually");
            }
            StateFilesCoverage::Incomplete => {
                logger.info("Some state files are missing, merging skipped");
            }
            StateFilesCoverage::Complete => {
                logger.info("No state files are missing");
                self.merge_if_all_finished(simulation, &siblings, logger)?;
            }
        }
        Ok(())
    }

    fn merge_if_all_finished(
        &mut self,
        simulation: &mut dyn RestorableSimulation,
        siblings: &[SiblingFile],
        logger: &mut dyn Logger,
    ) -> Result<(), EnsError> {
        for sibling in siblings {
            if !checkpoint::peek_header(&sibling.path)?.finished {
                logger.info("Some simulations must have been interrupted, merging skipped");
                return Ok(());
            }
        }

        simulation.clear();
        for sibling in siblings {
            checkpoint::absorb_payload(&sibling.path, simulation)?;
        }
        for sibling in siblings {
            remove_state_file(&sibling.path)?;
        }
        logger.info("All simulations are finished, state files merged");
        self.should_save = true;
        Ok(())
    }
}

fn remove_state_file(path: &Path) -> Result<(), EnsError> {
    fs::remove_file(path).map_err(|err| {
        EnsError::Checkpoint(
            ErrorInfo::new("state-file-remove", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })
}
