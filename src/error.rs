use thiserror::Error;

/// Reason a request was not attributed to the connector.
///
/// A rejection is never surfaced to the host as a failure; it only explains
/// why [`classify`](crate::RequestOriginClassifier::classify) returned `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Rejection {
    /// The rule that failed
    pub kind: RejectionKind,
    /// Human-readable message explaining the rejection
    pub message: String,
}

impl Rejection {
    /// Creates a new rejection.
    pub fn new(kind: RejectionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The classification rule a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionKind {
    /// The request carried no URI at all
    #[error("missing uri")]
    MissingUri,
    /// The URI does not contain the connector endpoint marker
    #[error("endpoint mismatch")]
    EndpointMismatch,
    /// The auth parameter is absent or empty
    #[error("missing auth token")]
    MissingAuthToken,
    /// An allow-list is configured and the source address is not on it
    #[error("source address not allowed")]
    SourceNotAllowed,
}

/// Failure reported by the host's storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The resource vanished between lookup and update
    #[error("resource {0} not found")]
    NotFound(u64),
    /// The host rejected or failed the write
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Problems found while loading or validating a [`GuardConfig`](crate::GuardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The endpoint marker is empty, which would match every URI
    #[error("endpoint_marker must not be empty")]
    EmptyEndpointMarker,
    /// The auth parameter name is empty
    #[error("auth_param must not be empty")]
    EmptyAuthParam,
    /// No resource types are guarded, so nothing could ever be intercepted
    #[error("guarded_types must name at least one resource type")]
    NoGuardedTypes,
}
