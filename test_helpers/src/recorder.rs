//! Ordered, thread-safe recording of step calls.

use std::sync::Arc;

use parking_lot::Mutex;

/// Shared log of the steps a fixture ran, in call order.
///
/// Clones share the same log, so a test can keep one handle while the
/// fixture owning another is moved into a scenario.
///
/// ```
/// use bddify_test_helpers::CallLog;
///
/// let log = CallLog::default();
/// let fixture_log = log.clone();
/// fixture_log.record("given_a_context");
/// fixture_log.record("then_it_passes");
/// assert_eq!(log.calls(), ["given_a_context", "then_it_passes"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    /// Appends `call` to the log.
    pub fn record(&self, call: impl Into<String>) {
        self.0.lock().push(call.into());
    }

    /// Snapshot of the recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Number of times `call` was recorded.
    #[must_use]
    pub fn count(&self, call: &str) -> usize {
        self.0.lock().iter().filter(|entry| *entry == call).count()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}
