#![deny(missing_docs)]

//! Core building blocks shared by the ENS simulation crates: the canonical
//! error type, the message-sink seam used by long-running simulations, the
//! deterministic RNG handle and the simulation span descriptor.

pub mod errors;
pub mod logging;
pub mod rng;
pub mod span;

pub use errors::{EnsError, ErrorInfo};
pub use logging::{BufferLogger, Logger, TracingLogger};
pub use rng::RngHandle;
pub use span::SimulationSpan;
