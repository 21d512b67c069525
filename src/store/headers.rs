//! Header list parsing.
//!
//! The diagnostic source renders headers as `Name: value` entries, one per
//! line in multi-line output or comma separated on a single line. An entry
//! starts at a header-name token followed by a colon and whitespace (or the
//! end of text), so values such as `localhost:5000` or `10:00:00` stay
//! intact.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, TraceError};

/// Ordered `(name, value)` pairs in order of appearance.
pub type Headers = Vec<(String, String)>;

lazy_static! {
    /// Header name (RFC 7230 token) preceded by start-of-text, whitespace or a comma.
    ///
    /// The whitespace after the colon is checked by the caller rather than
    /// matched, so it can still separate an empty value from the next name.
    static ref HEADER_NAME: Regex =
        Regex::new(r"(?:^|[\s,])([!#$%&'*+.^_`|~0-9A-Za-z-]+):").unwrap();
}

/// Parse a header list into ordered pairs.
///
/// Empty or whitespace-only text yields no headers. Any text before the
/// first header name is malformed.
pub fn parse_headers(raw: &str) -> Result<Headers> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let names: Vec<(usize, usize, &str)> = HEADER_NAME
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            let rest = &text[whole.end()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                Some((name.start(), whole.end(), name.as_str()))
            } else {
                None
            }
        })
        .collect();

    match names.first() {
        Some((start, _, _)) if *start == 0 => {}
        _ => {
            return Err(TraceError::HeaderFormat {
                raw: raw.to_string(),
            })
        }
    }

    let mut headers = Vec::with_capacity(names.len());
    for (i, (_, value_start, name)) in names.iter().enumerate() {
        let value_end = names
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(text.len());
        let value = text[*value_start..value_end]
            .trim()
            .trim_end_matches(',')
            .trim_end();
        headers.push((name.to_string(), value.to_string()));
    }

    Ok(headers)
}

/// First value for `name`, exact case-sensitive match.
pub fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}
