//! Payment-method name normalization.
//!
//! Canonicalizes display strings for case- and accent-insensitive
//! matching: "Banesco", "BANESCO" and "banesco " all normalize
//! identically, and accented variants fold to their unaccented ASCII
//! form ("Pago Móvil" becomes "pago movil").

use unicode_normalization::UnicodeNormalization;

/// Normalize a display string for fuzzy matching.
///
/// Decomposes accented characters (NFD), drops every non-ASCII codepoint
/// (which removes the combining marks the decomposition produced),
/// ASCII-lowercases, and trims surrounding whitespace. Total: malformed
/// input yields an empty or best-effort string, never an error.
pub fn normalize(s: &str) -> String {
    s.nfd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_lowercase()
        .trim()
        .to_string()
}
