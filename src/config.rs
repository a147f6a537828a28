//! Guard configuration.
//!
//! The configuration is read once by the host and injected into the
//! classifier and interceptor at construction. Nothing here reads process
//! state.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::resource::ResourceType;

/// Default substring identifying the connector endpoint in a request URI.
pub const DEFAULT_ENDPOINT_MARKER: &str = "jtlconnector";

/// Default query parameter carrying the connector's auth token.
pub const DEFAULT_AUTH_PARAM: &str = "jtlauth";

/// How the auth-token presence check inspects a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenCheck {
    /// Look the parameter up in the parsed query parameters only
    ParsedParams,
    /// Scan the raw query string for the parameter name, case-insensitively
    RawQuery,
    /// Accept either of the above
    #[default]
    Either,
}

/// Configuration for [`RequestOriginClassifier`](crate::RequestOriginClassifier)
/// and [`DeletionInterceptor`](crate::DeletionInterceptor).
///
/// # Known weakness
///
/// When `source_allow_list` is empty the source-address check is skipped
/// entirely. Any client that knows the endpoint marker and sends some auth
/// parameter is then treated as the connector. Operators who need more than a
/// heuristic should configure the allow-list.
///
/// # Examples
///
/// ```
/// use draft_guard::{GuardConfig, TokenCheck};
///
/// let config = GuardConfig::from_toml_str(r#"
///     debug = true
///     source_allow_list = ["10.0.0.5"]
///     token_check = "parsed_params"
/// "#).unwrap();
///
/// assert!(config.debug);
/// assert_eq!(config.token_check, TokenCheck::ParsedParams);
/// assert_eq!(config.endpoint_marker, "jtlconnector");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Emit diagnostic records for vetoed operations
    pub debug: bool,
    /// Source addresses allowed to act as the connector; empty disables the check
    pub source_allow_list: Vec<String>,
    /// Substring that must appear in the request URI (case-insensitive)
    pub endpoint_marker: String,
    /// Name of the auth query parameter
    pub auth_param: String,
    /// How the auth parameter is looked for
    pub token_check: TokenCheck,
    /// Resource types protected from connector deletes
    pub guarded_types: Vec<ResourceType>,
    /// Hide the commerce entity from the catalog when drafting it
    pub hide_from_catalog: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            debug: false,
            source_allow_list: Vec::new(),
            endpoint_marker: DEFAULT_ENDPOINT_MARKER.to_string(),
            auth_param: DEFAULT_AUTH_PARAM.to_string(),
            token_check: TokenCheck::default(),
            guarded_types: vec![ResourceType::Product, ResourceType::ProductVariation],
            hide_from_catalog: false,
        }
    }
}

impl GuardConfig {
    /// Parses and validates a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys, and
    /// the [`validate`](Self::validate) errors for inconsistent values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration can classify anything at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint_marker.trim().is_empty() {
            return Err(ConfigError::EmptyEndpointMarker);
        }
        if self.auth_param.trim().is_empty() {
            return Err(ConfigError::EmptyAuthParam);
        }
        if self.guarded_types.is_empty() {
            return Err(ConfigError::NoGuardedTypes);
        }
        Ok(())
    }

    /// Enables or disables diagnostic records.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Restricts connector attribution to the given source addresses.
    pub fn with_source_allow_list<I, S>(mut self, addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_allow_list = addrs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets how the auth parameter is looked for.
    pub fn with_token_check(mut self, check: TokenCheck) -> Self {
        self.token_check = check;
        self
    }

    /// Requests hiding the commerce entity when a resource is drafted.
    pub fn with_hide_from_catalog(mut self, hide: bool) -> Self {
        self.hide_from_catalog = hide;
        self
    }

    /// Returns true if `kind` is protected. Types are matched by slug.
    pub fn guards(&self, kind: &ResourceType) -> bool {
        self.guarded_types.iter().any(|t| t.as_slug() == kind.as_slug())
    }
}
