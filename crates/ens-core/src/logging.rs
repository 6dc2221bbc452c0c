//! Message sink threaded through executor runs.
//!
//! The executor only ever needs a place to put short coordination messages
//! ("no state file found", "all simulations are finished"), so the seam is a
//! minimal trait rather than a full subscriber setup. Production code wires
//! [`TracingLogger`]; tests capture lines with [`BufferLogger`].

/// Minimal message sink accepted by long-running simulation entry points.
pub trait Logger {
    /// Emits a progress or coordination message.
    fn info(&mut self, message: &str);
}

/// Logger forwarding every message to the `tracing` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&mut self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Logger capturing messages in memory, in emission order.
#[derive(Debug, Default)]
pub struct BufferLogger {
    lines: Vec<String>,
}

impl BufferLogger {
    /// Creates an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every captured line.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Checks whether any captured line contains the given fragment.
    pub fn contains(&self, fragment: &str) -> bool {
        self.lines.iter().any(|line| line.contains(fragment))
    }
}

impl Logger for BufferLogger {
    fn info(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}
