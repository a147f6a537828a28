/// Default cap for sanitized diagnostic fields, in characters.
pub const DEFAULT_MAX_LEN: usize = 256;

/// Cleans request-derived text before it is written to a diagnostic record.
///
/// Request URIs and addresses come straight from the client. Before they
/// reach a log line the sanitizer:
///
/// - drops control characters (so a value cannot forge extra log lines),
/// - collapses runs of whitespace into one space,
/// - trims the result,
/// - truncates it to `max_len` characters, marking the cut with `...`.
///
/// # Examples
///
/// ```
/// use draft_guard::TextSanitizer;
///
/// let s = TextSanitizer::new(64);
/// assert_eq!(s.sanitize("  10.0.0.1\r\nINJECTED  "), "10.0.0.1INJECTED");
/// assert_eq!(s.sanitize("a \t b"), "a b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSanitizer {
    max_len: usize,
}

impl TextSanitizer {
    /// Creates a sanitizer truncating at `max_len` characters.
    ///
    /// A `max_len` of zero is raised to one so output stays meaningful.
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len: max_len.max(1),
        }
    }

    /// Returns the configured maximum length.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Returns a cleaned copy of `input`.
    pub fn sanitize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len().min(self.max_len));
        let mut pending_space = false;

        for c in input.chars() {
            if c == ' ' || c == '\t' {
                pending_space = !out.is_empty();
                continue;
            }
            if c.is_control() {
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }

        if out.chars().count() > self.max_len {
            let keep = self.max_len.saturating_sub(3);
            let mut truncated: String = out.chars().take(keep).collect();
            truncated.push_str("...");
            return truncated;
        }
        out
    }

    /// Sanitizes an optional value, substituting `fallback` when it is absent
    /// or sanitizes to nothing.
    pub fn sanitize_or(&self, input: Option<&str>, fallback: &str) -> String {
        match input.map(|s| self.sanitize(s)) {
            Some(s) if !s.is_empty() => s,
            _ => fallback.to_string(),
        }
    }
}

impl Default for TextSanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEN)
    }
}
