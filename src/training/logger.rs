//! Verbosity-gated training output.

use std::fmt::Arguments;

/// Verbosity level for training output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Errors and warnings only.
    Warning,
    /// Progress and important information.
    Info,
    /// Detailed debugging information.
    Debug,
}

/// Structured logger for tree fitting.
///
/// Writes to stderr when the configured verbosity admits the message level.
#[derive(Clone, Debug)]
pub struct TrainingLogger {
    verbosity: Verbosity,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether messages at `level` are emitted.
    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    fn emit(&self, level: Verbosity, args: Arguments<'_>) {
        if self.enabled(level) {
            eprintln!("[causal-tree] {args}");
        }
    }

    pub fn warn(&self, args: Arguments<'_>) {
        self.emit(Verbosity::Warning, args);
    }

    pub fn start_fit(&self, n_rows: usize, n_features: usize) {
        self.emit(
            Verbosity::Info,
            format_args!("fitting honest causal tree on {n_rows} rows x {n_features} features"),
        );
    }

    pub fn log_partitions(&self, train: usize, validation: usize, estimation: usize) {
        self.emit(
            Verbosity::Info,
            format_args!("partitions: train={train} validation={validation} estimation={estimation}"),
        );
    }

    pub fn log_root(&self, effect: f64, objective: f64, variance: f64) {
        self.emit(
            Verbosity::Debug,
            format_args!("root: effect={effect:.6} objective={objective:.6} variance={variance:.6}"),
        );
    }

    pub fn log_split(&self, path: &str, feature: usize, threshold: f64, gain: f64) {
        self.emit(
            Verbosity::Debug,
            format_args!("split {path}: x[{feature}] <= {threshold} (gain {gain:.6})"),
        );
    }

    pub fn finish_fit(&self, n_leaves: u32, depth: u16, total_objective: f64) {
        self.emit(
            Verbosity::Info,
            format_args!("done: {n_leaves} leaves, depth {depth}, objective {total_objective:.6}"),
        );
    }
}
