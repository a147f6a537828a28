//! In-memory diagnostic recorder.

use std::cell::RefCell;

use super::InterceptionRecord;
use crate::host::DiagnosticSink;

/// In-memory recorder for interception records.
///
/// Useful in tests and for hosts that want to inspect what was vetoed during
/// a request before flushing it somewhere durable.
///
/// # Example
///
/// ```
/// use draft_guard::audit::{AuditTrail, InterceptionRecord, RecordOutcome};
/// use draft_guard::{DiagnosticSink, Operation, Request, Resource, ResourceStatus, ResourceType};
///
/// let trail = AuditTrail::new();
/// let req = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc");
/// let resource = Resource::new(1, ResourceType::Product, ResourceStatus::Published);
///
/// trail.record(&InterceptionRecord::capture(
///     &req, "jtlauth", &resource, Operation::Trash, RecordOutcome::Drafted,
/// ));
///
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug)]
pub struct AuditTrail {
    records: RefCell<Vec<InterceptionRecord>>,
}

impl AuditTrail {
    /// Creates a new empty trail.
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all records in the order they were recorded.
    pub fn records(&self) -> Vec<InterceptionRecord> {
        self.records.borrow().clone()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Clears all records.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for AuditTrail {
    fn record(&self, record: &InterceptionRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}

impl Default for AuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::RecordOutcome;
    use crate::interceptor::Operation;
    use crate::request::Request;
    use crate::resource::{Resource, ResourceStatus, ResourceType};

    fn record(request_id: &str, outcome: RecordOutcome) -> InterceptionRecord {
        let req = Request::from_uri(request_id, "/jtlconnector/?jtlauth=abc");
        let resource = Resource::new(3, ResourceType::Product, ResourceStatus::Published);
        InterceptionRecord::capture(&req, "jtlauth", &resource, Operation::Delete, outcome)
    }

    #[test]
    fn trail_starts_empty() {
        let trail = AuditTrail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn trail_keeps_order() {
        let trail = AuditTrail::new();
        trail.record(&record("req-1", RecordOutcome::Drafted));
        trail.record(&record("req-2", RecordOutcome::AlreadyDraft));

        let records = trail.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].request_id(), "req-1");
        assert_eq!(records[1].outcome(), RecordOutcome::AlreadyDraft);
    }

    #[test]
    fn trail_can_be_cleared() {
        let trail = AuditTrail::default();
        trail.record(&record("req-1", RecordOutcome::DraftFailed));
        trail.clear();
        assert!(trail.is_empty());
    }
}
