//! Append-only failure log owned by an initializer.

use crate::error::BootstrapFailure;

/// Ordered, append-only record of bootstrap failures.
///
/// Entries keep the order in which they were discovered and are never
/// removed or deduplicated. Callers only ever see the log as a slice.
///
/// # Example
///
/// ```
/// use ignition::{BootstrapFailure, FailureLog};
///
/// let mut log = FailureLog::new();
/// log.push(BootstrapFailure::UnknownDirective { name: "colour".into() });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FailureLog {
    entries: Vec<BootstrapFailure>,
}

impl FailureLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends one failure.
    pub fn push(&mut self, failure: BootstrapFailure) {
        self.entries.push(failure);
    }

    /// Appends every failure from `failures`, preserving their order.
    pub fn merge(&mut self, failures: impl IntoIterator<Item = BootstrapFailure>) {
        self.entries.extend(failures);
    }

    /// Returns a read-only view of the recorded failures.
    #[must_use]
    pub fn as_slice(&self) -> &[BootstrapFailure] {
        &self.entries
    }

    /// Returns the number of recorded failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the recorded failures in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, BootstrapFailure> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FailureLog {
    type Item = &'a BootstrapFailure;
    type IntoIter = std::slice::Iter<'a, BootstrapFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
