//! Verbosity-gated logging for iterative fitting.
//!
//! [`TrainingLogger`] decides *whether* something is worth reporting based on
//! the configured [`Verbosity`]; the events themselves go through `tracing`,
//! so the caller picks the subscriber (or none at all).

use std::time::Instant;

/// Verbosity level for training output.
///
/// Ordered so that `verbosity >= Verbosity::Info` reads naturally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Errors and warnings only.
    Warning,
    /// Progress and important information.
    Info,
    /// Detailed debugging information (one event per round).
    Debug,
}

impl Verbosity {
    /// Short lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::Silent => "silent",
            Verbosity::Warning => "warning",
            Verbosity::Info => "info",
            Verbosity::Debug => "debug",
        }
    }
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured logger for a single training run.
#[derive(Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
    n_rounds: usize,
    started: Option<Instant>,
}

impl TrainingLogger {
    /// Create a logger at the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            n_rounds: 0,
            started: None,
        }
    }

    /// Configured verbosity.
    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity != Verbosity::Silent && self.verbosity >= level
    }

    /// Mark the start of training.
    pub fn start_training(&mut self, n_rounds: usize) {
        self.n_rounds = n_rounds;
        self.started = Some(Instant::now());
        if self.enabled(Verbosity::Info) {
            tracing::info!(n_rounds, "starting training");
        }
    }

    /// Log a single round's metrics. Only emitted at [`Verbosity::Debug`].
    pub fn log_round(&self, round: usize, metrics: &[(&str, f64)]) {
        if !self.enabled(Verbosity::Debug) {
            return;
        }
        let rendered = metrics
            .iter()
            .map(|(name, value)| format!("{name}={value:.6e}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(round, n_rounds = self.n_rounds, "{rendered}");
    }

    /// Log that the stopping rule fired.
    pub fn log_early_stopping(&self, round: usize, reason: &str) {
        if self.enabled(Verbosity::Info) {
            tracing::info!(round, "stopping early: {reason}");
        }
    }

    /// Mark the end of training.
    pub fn finish_training(&self) {
        if self.enabled(Verbosity::Info) {
            let elapsed_ms = self
                .started
                .map(|t| t.elapsed().as_secs_f64() * 1e3)
                .unwrap_or_default();
            tracing::info!(elapsed_ms, "training finished");
        }
    }

    /// Emit `message` at [`Verbosity::Info`] and above.
    pub fn info(&self, message: &str) {
        if self.enabled(Verbosity::Info) {
            tracing::info!("{message}");
        }
    }

    /// Emit `message` at [`Verbosity::Debug`] only.
    pub fn debug(&self, message: &str) {
        if self.enabled(Verbosity::Debug) {
            tracing::debug!("{message}");
        }
    }

    /// Emit `message` at [`Verbosity::Warning`] and above.
    pub fn warn(&self, message: &str) {
        if self.enabled(Verbosity::Warning) {
            tracing::warn!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ordering() {
        assert!(Verbosity::Silent < Verbosity::Warning);
        assert!(Verbosity::Warning < Verbosity::Info);
        assert!(Verbosity::Info < Verbosity::Debug);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn silent_logger_gates_everything() {
        let logger = TrainingLogger::new(Verbosity::Silent);
        assert!(!logger.enabled(Verbosity::Warning));
        assert!(!logger.enabled(Verbosity::Debug));
    }

    #[test]
    fn info_logger_skips_debug() {
        let mut logger = TrainingLogger::new(Verbosity::Info);
        assert!(logger.enabled(Verbosity::Warning));
        assert!(logger.enabled(Verbosity::Info));
        assert!(!logger.enabled(Verbosity::Debug));

        logger.start_training(10);
        assert_eq!(logger.n_rounds, 10);
        logger.log_round(0, &[("cost", 1.0)]);
        logger.finish_training();
    }

    #[test]
    fn display_names() {
        assert_eq!(Verbosity::Debug.to_string(), "debug");
        assert_eq!(Verbosity::Silent.as_str(), "silent");
    }
}
