//! Diagnostic sink backed by `tracing`.

use super::{InterceptionRecord, RecordOutcome};
use crate::host::DiagnosticSink;

/// Target used for every record emitted by [`TracingSink`].
pub const TARGET: &str = "draft_guard::audit";

/// Writes interception records as structured `tracing` events.
///
/// Successful drafts and already-drafted vetoes are logged at `info`, failed
/// drafts at `warn`. The host's subscriber decides where they end up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    /// Creates a new tracing sink.
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn record(&self, record: &InterceptionRecord) {
        match record.outcome() {
            RecordOutcome::Drafted | RecordOutcome::AlreadyDraft => tracing::info!(
                target: TARGET,
                request_id = %record.request_id(),
                resource_id = record.resource_id(),
                resource_type = %record.resource_type(),
                operation = %record.operation(),
                outcome = %record.outcome(),
                "{}",
                record.message()
            ),
            RecordOutcome::DraftFailed => tracing::warn!(
                target: TARGET,
                request_id = %record.request_id(),
                resource_id = record.resource_id(),
                resource_type = %record.resource_type(),
                operation = %record.operation(),
                outcome = %record.outcome(),
                detail = ?record.detail(),
                "{}",
                record.message()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::Operation;
    use crate::request::Request;
    use crate::resource::{Resource, ResourceStatus, ResourceType};

    #[test]
    fn tracing_sink_record_does_not_panic() {
        let req = Request::from_uri("req-t", "/jtlconnector/?jtlauth=abc");
        let resource = Resource::new(5, ResourceType::Product, ResourceStatus::Published);

        for outcome in [
            RecordOutcome::Drafted,
            RecordOutcome::AlreadyDraft,
            RecordOutcome::DraftFailed,
        ] {
            let record =
                InterceptionRecord::capture(&req, "jtlauth", &resource, Operation::Trash, outcome);
            TracingSink::new().record(&record);
        }
    }
}
