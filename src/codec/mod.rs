//! Reversible escaping of store-reserved characters.
//!
//! The document store reserves `.` and `$` in collection names and in
//! document keys/operators. Topic names, descriptions, keywords and pinned ids
//! pass through [`encode`] before they reach the store and through [`decode`]
//! on the way back out.
//!
//! Both reserved characters map to code points from the Unicode private use
//! area. A third private use code point marks a literal occurrence of any of
//! the three substitutes, so `decode(encode(x)) == x` holds for every input.

/// Stands in for a literal `.`.
pub const DOT_SUBSTITUTE: char = '\u{E000}';
/// Stands in for a literal `$`.
pub const DOLLAR_SUBSTITUTE: char = '\u{E001}';
/// Prefixes a substitute code point that was present in the original text.
pub const LITERAL_PREFIX: char = '\u{E002}';

/// The character the store treats as an operator prefix.
pub const RESERVED_SENTINEL: char = '$';

/// Replace every `.` and `$` with its private substitute.
#[must_use]
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '.' => out.push(DOT_SUBSTITUTE),
            '$' => out.push(DOLLAR_SUBSTITUTE),
            DOT_SUBSTITUTE | DOLLAR_SUBSTITUTE | LITERAL_PREFIX => {
                out.push(LITERAL_PREFIX);
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Exact inverse of [`encode`].
///
/// A dangling [`LITERAL_PREFIX`] at the end of the input cannot come from
/// `encode` and is kept as-is.
#[must_use]
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        match ch {
            DOT_SUBSTITUTE => out.push('.'),
            DOLLAR_SUBSTITUTE => out.push('$'),
            LITERAL_PREFIX => out.push(chars.next().unwrap_or(LITERAL_PREFIX)),
            _ => out.push(ch),
        }
    }
    out
}

/// Encode each element of a sequence.
#[must_use]
pub fn encode_all(items: &[String]) -> Vec<String> {
    items.iter().map(|item| encode(item)).collect()
}

/// Decode each element of a sequence.
#[must_use]
pub fn decode_all(items: &[String]) -> Vec<String> {
    items.iter().map(|item| decode(item)).collect()
}

/// Whether raw user input starts with the store's operator sentinel.
#[must_use]
pub fn starts_with_sentinel(text: &str) -> bool {
    text.starts_with(RESERVED_SENTINEL)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
