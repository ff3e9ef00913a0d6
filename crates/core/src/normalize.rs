//! Key normalization for brand comparison.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a string for brand-key equality.
///
/// Pipeline: lower-case → NFD decomposition → strip combining marks →
/// `&` becomes `and` → keep only ASCII lower-case letters and digits.
///
/// The result is a comparison key, never shown to users. Idempotent:
/// the output contains nothing the pipeline would transform again.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c == '&' {
            out.push_str("and");
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        }
    }
    out
}
