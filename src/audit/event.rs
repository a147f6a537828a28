//! Diagnostic record schema.
//!
//! Records hold only sanitized, redacted metadata so they can be written to
//! any log without leaking the connector's auth token.

use std::fmt;

use crate::interceptor::Operation;
use crate::request::Request;
use crate::resource::{Resource, ResourceId};
use crate::sanitizer::TextSanitizer;

/// Placeholder used when the source address is unknown.
pub const UNKNOWN_SOURCE: &str = "unknown";

/// What happened to a vetoed delete or trash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The resource was switched to draft
    Drafted,
    /// The resource already was a draft; nothing changed
    AlreadyDraft,
    /// The draft update failed; the operation was vetoed anyway
    DraftFailed,
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOutcome::Drafted => write!(f, "drafted"),
            RecordOutcome::AlreadyDraft => write!(f, "already_draft"),
            RecordOutcome::DraftFailed => write!(f, "draft_failed"),
        }
    }
}

/// A diagnostic record for one vetoed operation.
///
/// # Example
///
/// ```
/// use draft_guard::{Operation, Request, Resource, ResourceStatus, ResourceType};
/// use draft_guard::audit::{InterceptionRecord, RecordOutcome};
///
/// let req = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc")
///     .with_source_address("10.0.0.5");
/// let resource = Resource::new(42, ResourceType::Product, ResourceStatus::Published);
///
/// let record = InterceptionRecord::capture(
///     &req, "jtlauth", &resource, Operation::Delete, RecordOutcome::Drafted,
/// );
///
/// assert_eq!(
///     record.message(),
///     "keep-draft: prevented delete/trash for resource ID 42 from IP 10.0.0.5 \
///      (URI=/jtlconnector/?jtlauth=[REDACTED])"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptionRecord {
    request_id: String,
    resource_id: ResourceId,
    resource_type: String,
    operation: Operation,
    outcome: RecordOutcome,
    source_address: String,
    uri: String,
    detail: Option<String>,
}

impl InterceptionRecord {
    /// Builds a record from the request and resource, redacting the value of
    /// `auth_param` and sanitizing every request-derived field.
    pub fn capture(
        request: &Request,
        auth_param: &str,
        resource: &Resource,
        operation: Operation,
        outcome: RecordOutcome,
    ) -> Self {
        let sanitizer = TextSanitizer::default();
        let uri = request
            .redacted_uri(auth_param)
            .map(|u| sanitizer.sanitize(&u))
            .unwrap_or_default();

        Self {
            request_id: sanitizer.sanitize(request.request_id()),
            resource_id: resource.id,
            resource_type: resource.kind.to_string(),
            operation,
            outcome,
            source_address: sanitizer.sanitize_or(request.source_address(), UNKNOWN_SOURCE),
            uri,
            detail: None,
        }
    }

    /// Attaches a free-text detail, e.g. a storage error message.
    pub fn with_detail(mut self, detail: impl AsRef<str>) -> Self {
        self.detail = Some(TextSanitizer::default().sanitize(detail.as_ref()));
        self
    }

    /// Returns the request correlation id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the id of the protected resource.
    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Returns the host type slug of the resource.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the vetoed operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns what happened instead of the operation.
    pub fn outcome(&self) -> RecordOutcome {
        self.outcome
    }

    /// Returns the sanitized source address, or `unknown`.
    pub fn source_address(&self) -> &str {
        &self.source_address
    }

    /// Returns the sanitized, redacted request URI (empty if there was none).
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the attached detail, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Renders the one-line operator message.
    pub fn message(&self) -> String {
        format!(
            "keep-draft: prevented delete/trash for resource ID {} from IP {} (URI={})",
            self.resource_id, self.source_address, self.uri
        )
    }
}

impl fmt::Display for InterceptionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [request_id={}, operation={}, outcome={}",
            self.message(),
            self.request_id,
            self.operation,
            self.outcome
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ", detail={}", detail)?;
        }
        write!(f, "]")
    }
}
