use std::fmt;

/// Marker written in place of a redacted value.
pub const REDACTED: &str = "[REDACTED]";

/// A wrapper that keeps the connector's auth token out of logs.
///
/// The guard only checks that the token is present; it never validates or
/// prints it. `Secret<T>` makes accidental exposure through `Debug` or
/// `Display` impossible. The value is reachable only via
/// [`expose_secret`](Self::expose_secret).
///
/// # Examples
///
/// ```
/// use draft_guard::Secret;
///
/// let token = Secret::new("abc123".to_string());
/// assert_eq!(format!("{:?}", token), "[REDACTED]");
/// assert_eq!(token.expose_secret(), "abc123");
/// ```
// Do NOT add Clone, Copy, Default, Deref or AsRef. Each would allow the
// token to leak past the redacting formatters.
pub struct Secret<T> {
    inner: T,
}

impl<T> Secret<T> {
    /// Wraps a sensitive value.
    pub fn new(value: T) -> Self {
        Self { inner: value }
    }

    /// Explicitly exposes the wrapped value.
    pub fn expose_secret(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
