//! Progress logging for the enumeration loop.

/// Verbosity level for enumeration output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Per-level progress lines and summary statistics.
    Info,
}

/// Line-based progress logger.
///
/// Verbosity also controls whether the per-level debug statistics are
/// collected by the driver; the logger itself only handles text output.
#[derive(Debug, Clone, Copy)]
pub struct ProgressLogger {
    verbosity: Verbosity,
}

impl ProgressLogger {
    /// Create a logger with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// Returns `true` if info-level messages are emitted.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.verbosity >= Verbosity::Info
    }

    /// Emit an info-level progress line.
    pub fn info(&self, msg: &str) {
        if self.enabled() {
            println!("{msg}");
        }
    }
}
