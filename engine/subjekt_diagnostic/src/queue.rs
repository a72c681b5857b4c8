//! Collecting queue for diagnostics.

use crate::{Diagnostic, Severity};

/// Maximum number of errors kept before further errors are dropped
/// (warnings and infos are never limited).
const DEFAULT_ERROR_LIMIT: usize = 10;

/// Collector for diagnostics emitted during one resolution session.
///
/// Purely accumulative: adding never fails and never influences engine
/// control flow. `flush` hands the collected messages back sorted by source
/// position.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    collected: Vec<Diagnostic>,
    error_count: usize,
    dropped_errors: usize,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Error {
            if self.error_count >= DEFAULT_ERROR_LIMIT {
                self.dropped_errors += 1;
                return;
            }
            self.error_count += 1;
        }
        self.collected.push(diagnostic);
    }

    /// Merge another collector's contents into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        for diagnostic in other.collected {
            self.add(diagnostic);
        }
        self.dropped_errors += other.dropped_errors;
    }

    /// Number of collected errors.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether any error was collected.
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.collected
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Errors dropped once the error limit was reached.
    pub fn dropped_errors(&self) -> usize {
        self.dropped_errors
    }

    /// Iterate over collected diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.collected.iter()
    }

    /// Drain all collected diagnostics, sorted by source position
    /// (span-less messages first).
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.collected);
        self.error_count = 0;
        self.dropped_errors = 0;
        out.sort_by_key(|d| d.span.map(|s| (s.start, s.end)));
        out
    }
}
