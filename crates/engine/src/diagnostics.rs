//! Diagnostic reporting for fetch failures and callback panics.
//!
//! Failures never surface to the caller as errors; they are recovered
//! locally and reported through a [`DiagnosticSink`]. The default sink
//! forwards to `tracing`, matching how the rest of the workspace reports
//! provider failures.

use tracing::warn;
use typeahead_types::DiagnosticEvent;

/// Observer for pipeline diagnostics.
///
/// Implementations must not panic back into the pipeline.
pub trait DiagnosticSink: Send + Sync {
    /// Receives one diagnostic event. Called from the pipeline task.
    fn report(&self, event: DiagnosticEvent);
}

/// Default sink that logs every event through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::BaselineFetchFailed { error } => {
                warn!(error = %error, "baseline fetch failed");
            }
            DiagnosticEvent::FilteredFetchFailed { filter, error } => {
                warn!(filter = %filter, error = %error, "filtered fetch failed");
            }
            DiagnosticEvent::SelectionCallbackPanicked { index } => {
                warn!(index, "selection callback panicked");
            }
        }
    }
}
