use std::io::{Read, Write};

use ens_core::EnsError;
use serde::{Deserialize, Serialize};

use crate::restorable::{self, Restorable};

/// Mean of a sample set together with the standard error of the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanAndError {
    /// Arithmetic mean of the samples.
    pub mean: f64,
    /// Standard error of the mean (zero for a single sample).
    pub error: f64,
}

/// Scalar sample accumulator that can be checkpointed and merged.
///
/// Each trial pushes one or more samples; joining restored state appends the
/// restored samples, so partial accumulators from several workers combine
/// into the set an uninterrupted single run would have produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesAccumulator {
    samples: Vec<f64>,
}

impl SeriesAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single sample.
    pub fn push(&mut self, sample: f64) {
        self.samples.push(sample);
    }

    /// Returns the accumulated samples in insertion order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Computes the mean and its standard error, or `None` with no samples.
    pub fn mean_and_error(&self) -> Option<MeanAndError> {
        let count = self.samples.len();
        if count == 0 {
            return None;
        }
        let mean = self.samples.iter().sum::<f64>() / count as f64;
        if count == 1 {
            return Some(MeanAndError { mean, error: 0.0 });
        }
        let variance = self
            .samples
            .iter()
            .map(|sample| (sample - mean) * (sample - mean))
            .sum::<f64>()
            / (count - 1) as f64;
        Some(MeanAndError {
            mean,
            error: (variance / count as f64).sqrt(),
        })
    }
}

impl Restorable for SeriesAccumulator {
    fn store_state(&self, out: &mut dyn Write) -> Result<(), EnsError> {
        restorable::store_vector(&self.samples, out)
    }

    fn join_restored_state(&mut self, input: &mut dyn Read) -> Result<(), EnsError> {
        restorable::join_vector(&mut self.samples, input)
    }

    fn clear(&mut self) {
        self.samples.clear();
    }
}
