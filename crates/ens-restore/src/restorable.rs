use std::io::{Read, Write};

use ens_core::errors::ErrorInfo;
use ens_core::{EnsError, Logger};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A set of accumulated data that can be stored, restored and joined.
///
/// Joining is the merge primitive of the whole subsystem: restoring a payload
/// *combines* it with whatever the object already holds. For a simulation that
/// collects a set of samples this means appending the restored samples, so
/// partial results from several workers can be folded into one accumulator.
/// The combine operation must not depend on absorption order beyond the
/// ascending-span order the executor guarantees.
pub trait Restorable {
    /// Serializes the current state as an opaque binary payload.
    fn store_state(&self, out: &mut dyn Write) -> Result<(), EnsError>;

    /// Deserializes a payload and combines it with the state already present.
    fn join_restored_state(&mut self, input: &mut dyn Read) -> Result<(), EnsError>;

    /// Resets all accumulated data.
    fn clear(&mut self);

    /// Overwrites existing data with the payload read from `input`.
    fn restore_state(&mut self, input: &mut dyn Read) -> Result<(), EnsError> {
        self.clear();
        self.join_restored_state(input)
    }
}

/// A restorable accumulator that can also execute trials.
///
/// This is the only view the executor has of the domain: it never inspects
/// the accumulated content, it only resets, seeds, runs trials and moves the
/// opaque payload around.
pub trait RestorableSimulation: Restorable {
    /// (Re)initializes the internal randomness sources.
    fn seed_random_generators(&mut self, seed: u64);

    /// Executes trial `index` out of `total`, mutating internal state.
    fn perform_simulation(
        &mut self,
        index: u64,
        total: u64,
        logger: &mut dyn Logger,
    ) -> Result<(), EnsError>;

    /// Short discriminator distinguishing this kind of simulation in filenames.
    fn tag_name(&self) -> &str;
}

/// Stores a slice of samples as a length-prefixed binary sequence.
pub fn store_vector<T: Serialize>(samples: &[T], out: &mut dyn Write) -> Result<(), EnsError> {
    bincode::serialize_into(&mut *out, samples)
        .map_err(|err| EnsError::Serde(ErrorInfo::new("vector-store", err.to_string())))
}

/// Reads a length-prefixed sequence and appends it to `samples`.
pub fn join_vector<T: DeserializeOwned>(
    samples: &mut Vec<T>,
    input: &mut dyn Read,
) -> Result<(), EnsError> {
    let restored: Vec<T> = bincode::deserialize_from(&mut *input)
        .map_err(|err| EnsError::Serde(ErrorInfo::new("vector-join", err.to_string())))?;
    samples.reserve(restored.len());
    samples.extend(restored);
    Ok(())
}

/// Stores a fixed-bin histogram: bin count followed by each bin's samples.
pub fn store_histogram<T: Serialize>(
    bins: &[Vec<T>],
    out: &mut dyn Write,
) -> Result<(), EnsError> {
    let num_bins = bins.len() as u64;
    bincode::serialize_into(&mut *out, &num_bins)
        .map_err(|err| EnsError::Serde(ErrorInfo::new("histogram-store", err.to_string())))?;
    for bin in bins {
        bincode::serialize_into(&mut *out, bin)
            .map_err(|err| EnsError::Serde(ErrorInfo::new("histogram-store", err.to_string())))?;
    }
    Ok(())
}

/// Reads a histogram payload and appends each restored bin to the matching
/// bin of `bins`. The bin count is part of the structure, not of the data, so
/// a mismatch is an error.
pub fn join_histogram<T: DeserializeOwned>(
    bins: &mut [Vec<T>],
    input: &mut dyn Read,
) -> Result<(), EnsError> {
    let restored_bins: u64 = bincode::deserialize_from(&mut *input)
        .map_err(|err| EnsError::Serde(ErrorInfo::new("histogram-join", err.to_string())))?;
    if restored_bins != bins.len() as u64 {
        return Err(EnsError::Serde(
            ErrorInfo::new("histogram-bins-mismatch", "restored bin count differs")
                .with_context("expected", bins.len().to_string())
                .with_context("restored", restored_bins.to_string()),
        ));
    }
    for bin in bins.iter_mut() {
        let restored: Vec<T> = bincode::deserialize_from(&mut *input)
            .map_err(|err| EnsError::Serde(ErrorInfo::new("histogram-join", err.to_string())))?;
        bin.reserve(restored.len());
        bin.extend(restored);
    }
    Ok(())
}
