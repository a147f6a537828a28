use crate::{
    config::{GuardConfig, TokenCheck},
    error::{Rejection, RejectionKind},
    policy::OriginRule,
    request::Request,
    secret::Secret,
};

/// Proof that a request passed every [`OriginRule`].
///
/// Only [`RequestOriginClassifier::evaluate`] can produce one.
#[derive(Debug)]
pub struct ConnectorOrigin {
    request_id: String,
    token: Option<Secret<String>>,
}

impl ConnectorOrigin {
    /// Returns the correlation id of the attributed request.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the auth token when it was found as a parsed parameter.
    ///
    /// A match found only by scanning the raw query yields `None`.
    pub fn token(&self) -> Option<&Secret<String>> {
        self.token.as_ref()
    }
}

/// Decides whether a request comes from the connector integration.
///
/// This is a heuristic fingerprint: a substring match on the URI, presence of
/// an auth parameter and an optional source allow-list. It fails closed when
/// request data is missing and fails open when no allow-list is configured.
///
/// # Examples
///
/// ```
/// use draft_guard::{GuardConfig, Request, RequestOriginClassifier};
///
/// let classifier = RequestOriginClassifier::new(GuardConfig::default());
///
/// assert!(classifier.classify(&Request::from_uri("r1", "/JTLConnector/?jtlauth=abc")));
/// assert!(!classifier.classify(&Request::from_uri("r2", "/shop/checkout")));
/// ```
#[derive(Debug, Clone)]
pub struct RequestOriginClassifier {
    config: GuardConfig,
}

impl RequestOriginClassifier {
    /// Creates a classifier with the given configuration.
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Returns true iff the request is attributed to the connector.
    pub fn classify(&self, request: &Request) -> bool {
        self.evaluate(request).is_ok()
    }

    /// Evaluates every [`OriginRule`] in order and explains the outcome.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] for the first rule that fails. A rejection is
    /// an explanation, not a failure the host has to handle.
    pub fn evaluate(&self, request: &Request) -> Result<ConnectorOrigin, Rejection> {
        for rule in OriginRule::ALL {
            self.check(rule, request)?;
        }

        tracing::debug!(
            request_id = %request.request_id(),
            "request attributed to connector"
        );

        Ok(ConnectorOrigin {
            request_id: request.request_id().to_string(),
            token: self.parsed_token(request).map(|t| Secret::new(t.to_string())),
        })
    }

    fn check(&self, rule: OriginRule, request: &Request) -> Result<(), Rejection> {
        match rule {
            OriginRule::EndpointMatch => {
                let uri = match request.uri() {
                    Some(uri) if !uri.is_empty() => uri,
                    _ => {
                        return Err(Rejection::new(
                            RejectionKind::MissingUri,
                            "request has no uri",
                        ))
                    }
                };
                if !contains_ignore_case(uri, &self.config.endpoint_marker) {
                    return Err(Rejection::new(
                        RejectionKind::EndpointMismatch,
                        format!("uri does not contain '{}'", self.config.endpoint_marker),
                    ));
                }
            }
            OriginRule::AuthTokenPresent => {
                let found = match self.config.token_check {
                    TokenCheck::ParsedParams => self.parsed_token(request).is_some(),
                    TokenCheck::RawQuery => self.raw_query_mentions_token(request),
                    // A parsed key is authoritative; the scan only covers
                    // spellings the exact lookup cannot see.
                    TokenCheck::Either => match request.query_param(&self.config.auth_param) {
                        Some(value) => !value.is_empty(),
                        None => self.raw_query_mentions_token(request),
                    },
                };
                if !found {
                    return Err(Rejection::new(
                        RejectionKind::MissingAuthToken,
                        format!("'{}' parameter not present", self.config.auth_param),
                    ));
                }
            }
            OriginRule::SourceAllowed => {
                let allow = &self.config.source_allow_list;
                if allow.is_empty() {
                    // Fail open: no allow-list means no source restriction.
                    return Ok(());
                }
                let permitted = request
                    .source_address()
                    .map(str::trim)
                    .is_some_and(|addr| allow.iter().any(|a| a.trim() == addr));
                if !permitted {
                    return Err(Rejection::new(
                        RejectionKind::SourceNotAllowed,
                        "source address is not on the allow-list",
                    ));
                }
            }
        }
        Ok(())
    }

    fn parsed_token<'r>(&self, request: &'r Request) -> Option<&'r str> {
        request
            .query_param(&self.config.auth_param)
            .filter(|v| !v.is_empty())
    }

    /// Case-insensitive scan of the raw query. An occurrence written as
    /// `name=` with nothing after it is an empty value and does not count.
    fn raw_query_mentions_token(&self, request: &Request) -> bool {
        let Some(query) = request.raw_query() else {
            return false;
        };
        let query = query.to_ascii_lowercase();
        let name = self.config.auth_param.to_ascii_lowercase();

        query.match_indices(&name).any(|(at, _)| {
            match query[at + name.len()..].strip_prefix('=') {
                Some(value) => !(value.is_empty() || value.starts_with('&')),
                None => true,
            }
        })
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
