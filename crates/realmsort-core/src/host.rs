//! Host extraction from raw access-log lines.
//!
//! Access-log records quote the request field (`"GET https://host/path
//! HTTP/1.1"`), so the line is tokenized with shell-word semantics before
//! searching for a URL. Extraction is total: any tokenization or parse
//! failure yields `None`, and the caller routes such lines to the default
//! realm instead of dropping them.

use url::Url;

/// Extract the lower-cased request hostname from one raw log line.
///
/// The first token containing `http://` or `https://` is treated as the
/// request field; within it, the first whitespace-separated part that
/// starts with a scheme is parsed as the URL. Returns `None` when the line
/// cannot be tokenized (unbalanced quoting), no URL-bearing token exists,
/// or the candidate does not parse to a URL with a hostname.
///
/// # Examples
///
/// ```
/// use realmsort_core::host::extract_host;
///
/// let line = r#"https 2024-01-01T00:00:00Z app/lb/1 1.2.3.4:5 "GET https://acme.example.com:443/ HTTP/2.0""#;
/// assert_eq!(extract_host(line).as_deref(), Some("acme.example.com"));
/// assert_eq!(extract_host("no url here"), None);
/// ```
#[must_use]
pub fn extract_host(line: &str) -> Option<String> {
    let tokens = shell_split(line)?;

    let request = tokens
        .iter()
        .find(|t| t.contains("http://") || t.contains("https://"))?;

    // The request field may carry more than just the URL ("GET <url>
    // HTTP/1.1"); take the first sub-part that is actually a URL.
    let candidate = request
        .split_whitespace()
        .find(|p| p.starts_with("http://") || p.starts_with("https://"))?;

    // An empty authority ("https:///path") would make the WHATWG parser
    // promote the first path segment to a host; such a URL has no hostname.
    let (_, after_scheme) = candidate.split_once("://")?;
    if after_scheme.is_empty() || after_scheme.starts_with('/') {
        return None;
    }

    let parsed = Url::parse(candidate).ok()?;
    parsed.host_str().map(str::to_ascii_lowercase)
}

/// Tokenizer state for [`shell_split`].
enum QuoteState {
    /// Outside any quotes.
    Normal,
    /// Inside single quotes; everything is literal.
    Single,
    /// Inside double quotes; backslash escapes `"` and `\`.
    Double,
}

/// Split a line into shell words.
///
/// Quoted substrings (single or double) become part of a single token, a
/// backslash escapes the following character, and unquoted whitespace
/// separates tokens. Returns `None` on unbalanced quoting or a trailing
/// bare backslash.
fn shell_split(line: &str) -> Option<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut state = QuoteState::Normal;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match state {
            QuoteState::Normal => match c {
                '\'' => {
                    state = QuoteState::Single;
                    in_token = true;
                }
                '"' => {
                    state = QuoteState::Double;
                    in_token = true;
                }
                '\\' => {
                    current.push(chars.next()?);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
            QuoteState::Single => match c {
                '\'' => state = QuoteState::Normal,
                c => current.push(c),
            },
            QuoteState::Double => match c {
                '"' => state = QuoteState::Normal,
                '\\' => match chars.next()? {
                    n @ ('"' | '\\') => current.push(n),
                    n => {
                        // Inside double quotes a backslash only escapes the
                        // quote and itself; otherwise it is literal.
                        current.push('\\');
                        current.push(n);
                    }
                },
                c => current.push(c),
            },
        }
    }

    // A quote left open means the line is malformed.
    if !matches!(state, QuoteState::Normal) {
        return None;
    }
    if in_token {
        tokens.push(current);
    }
    Some(tokens)
}
