//! Diagnostic records for vetoed operations.
//!
//! This module provides:
//! - `InterceptionRecord`: sanitized, redacted description of one veto
//! - `AuditTrail`: in-memory recorder
//! - `TracingSink`: recorder that writes through `tracing`
//!
//! Records are only produced when [`GuardConfig::debug`](crate::GuardConfig)
//! is set. They never influence an interception decision.

mod event;
mod tracing_sink;
mod trail;

pub use event::{InterceptionRecord, RecordOutcome, UNKNOWN_SOURCE};
pub use tracing_sink::{TracingSink, TARGET};
pub use trail::AuditTrail;
