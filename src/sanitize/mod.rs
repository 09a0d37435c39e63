//! Markup stripping for user-supplied text.
//!
//! The core only ever sees sanitizing through the [`Sanitizer`] trait, so the
//! stripping strategy can be swapped without touching the repository code.
use regex::Regex;
use std::sync::LazyLock;

/// Pure text sanitizer: the output carries no residual markup.
pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

impl<F> Sanitizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn sanitize(&self, text: &str) -> String {
        self(text)
    }
}

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("COMMENT_REGEX is a valid regex literal"));

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static SCRIPT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</\s*(script|style)\s*>")
        .expect("SCRIPT_REGEX is a valid regex literal")
});

#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z!][^>]*>").expect("TAG_REGEX is a valid regex literal")
});

/// Default sanitizer: drops comments, `<script>`/`<style>` blocks (with their
/// content) and every remaining tag, then trims surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStripper;

impl Sanitizer for MarkupStripper {
    fn sanitize(&self, text: &str) -> String {
        let text = COMMENT_REGEX.replace_all(text, "");
        let text = SCRIPT_REGEX.replace_all(&text, "");
        let text = TAG_REGEX.replace_all(&text, "");
        text.trim().to_string()
    }
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
