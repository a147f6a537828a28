//! Inbound request as seen by the classifier.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::secret::REDACTED;

/// One inbound HTTP-style call that may trigger a delete or trash.
///
/// Absent parts are modelled as `None` or empty maps; the classifier treats
/// them as "not the connector" rather than as errors.
///
/// # Examples
///
/// ```
/// use draft_guard::Request;
///
/// let req = Request::from_uri("req-1", "/jtlconnector/?jtlauth=abc&x=1")
///     .with_source_address("10.0.0.5");
///
/// assert_eq!(req.uri(), Some("/jtlconnector/?jtlauth=abc&x=1"));
/// assert_eq!(req.raw_query(), Some("jtlauth=abc&x=1"));
/// assert_eq!(req.query_param("jtlauth"), Some("abc"));
/// assert_eq!(req.source_address(), Some("10.0.0.5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    request_id: String,
    uri: Option<String>,
    query_params: HashMap<String, String>,
    raw_query: Option<String>,
    source_address: Option<String>,
}

impl Request {
    /// Creates an empty request with the given correlation id.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    /// Creates a request from a raw request URI (path plus optional query).
    ///
    /// The query part is kept verbatim for substring scans and also decoded
    /// as `application/x-www-form-urlencoded` into parameters. A key without
    /// `=` maps to an empty value; on repeated keys the last one wins.
    pub fn from_uri(request_id: impl Into<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let mut req = Self::new(request_id);

        if let Some((_, rest)) = uri.split_once('?') {
            let query = rest.split_once('#').map_or(rest, |(q, _)| q);
            req.query_params = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
            req.raw_query = Some(query.to_string());
        }
        req.uri = Some(uri);
        req
    }

    /// Sets the source address the request arrived from.
    pub fn with_source_address(mut self, addr: impl Into<String>) -> Self {
        self.source_address = Some(addr.into());
        self
    }

    /// Adds or replaces a parsed query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    /// Returns the correlation id.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Returns the full request URI, if any.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns the raw query string (without `?`), if any.
    pub fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    /// Looks up a parsed query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_params.get(key).map(String::as_str)
    }

    /// Returns all parsed query parameters.
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Returns the source address, if known.
    pub fn source_address(&self) -> Option<&str> {
        self.source_address.as_deref()
    }

    /// Returns the URI with every value of `param` replaced by `[REDACTED]`.
    ///
    /// Used before a URI is written to any diagnostic output.
    pub fn redacted_uri(&self, param: &str) -> Option<String> {
        let uri = self.uri.as_deref()?;
        let Some((path, rest)) = uri.split_once('?') else {
            return Some(uri.to_string());
        };
        let (query, fragment) = match rest.split_once('#') {
            Some((q, f)) => (q, Some(f)),
            None => (rest, None),
        };

        let pairs: Vec<String> = query
            .split('&')
            .map(|pair| {
                let is_param = form_urlencoded::parse(pair.as_bytes())
                    .next()
                    .is_some_and(|(key, _)| key.eq_ignore_ascii_case(param));
                match pair.split_once('=') {
                    Some((k, _)) if is_param => format!("{}={}", k, REDACTED),
                    _ => pair.to_string(),
                }
            })
            .collect();

        let mut out = format!("{}?{}", path, pairs.join("&"));
        if let Some(f) = fragment {
            out.push('#');
            out.push_str(f);
        }
        Some(out)
    }
}
