//! Trial index span assigned to a single executor invocation.

use serde::{Deserialize, Serialize};

use crate::errors::{EnsError, ErrorInfo};

/// Half-open slice `[from, to)` of the full `[0, total)` trial index range.
///
/// `from` and `to` describe the simulations performed by this worker, while
/// `total` refers to the whole workload across all workers. A workload split
/// over several processes is expressed as several spans sharing one `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSpan {
    /// First simulation index (inclusive) performed by this worker.
    pub from: u64,
    /// Final simulation index (exclusive) performed by this worker.
    pub to: u64,
    /// Total number of simulations across all workers.
    pub total: u64,
}

impl SimulationSpan {
    /// Creates a span after checking the invariant `from < to <= total`.
    pub fn new(from: u64, to: u64, total: u64) -> Result<Self, EnsError> {
        let span = Self { from, to, total };
        span.validate()?;
        Ok(span)
    }

    /// Checks that the span satisfies `total > 0` and `from < to <= total`.
    pub fn validate(&self) -> Result<(), EnsError> {
        if self.total == 0 || self.from >= self.to || self.to > self.total {
            return Err(EnsError::Span(
                ErrorInfo::new(
                    "span-invalid",
                    "simulation span must satisfy from < to <= total",
                )
                .with_context("from", self.from.to_string())
                .with_context("to", self.to.to_string())
                .with_context("total", self.total.to_string()),
            ));
        }
        Ok(())
    }

    /// Number of simulations assigned to this worker.
    pub fn len(&self) -> u64 {
        self.to.saturating_sub(self.from)
    }

    /// Whether the span contains no simulations. Always false for a valid span.
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }
}
