//! Input Sanitization
//!
//! Strips a fixed blacklist of injection-prone substrings from untrusted
//! string fields before they reach persistence calls. Never applied to
//! passwords: those must reach the hasher verbatim.

/// Substrings removed from untrusted input, in this order.
const BLACKLIST: &[&str] = &[";", "'", "\"", "\\", "--", "/*", "*/", "`"];

/// Remove blacklisted substrings globally, then trim surrounding whitespace.
///
/// Deterministic and side-effect free; empty input yields an empty string.
pub fn sanitize(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let mut cleaned = input.to_string();
    for pattern in BLACKLIST {
        if cleaned.contains(pattern) {
            cleaned = cleaned.replace(pattern, "");
        }
    }

    cleaned.trim().to_string()
}
