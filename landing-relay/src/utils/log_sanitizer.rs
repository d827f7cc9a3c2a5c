//! Log sanitization utilities
//!
//! Visitor data (names, email addresses, free-text messages) must never land
//! in the browser console or in server logs verbatim.

/// Maximum number of bytes of a relay response body kept in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Truncate a string for safe logging, never splitting a UTF-8 character.
///
/// Strings within the limit come back unchanged; longer ones keep the prefix
/// and gain a suffix with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let mut cut = TRUNCATE_LIMIT;
    while cut > 0 && !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

/// Describe submitted fields without their values: `name(3) email(17)`.
pub fn describe_fields(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{name}({})", value.chars().count()))
        .collect::<Vec<_>>()
        .join(" ")
}
