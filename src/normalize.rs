// Canonical keys for province/city names coming from differently authored
// tables ("Bahía Blanca", "bahia   blanca", "BAHIA_BLANCA").
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.\s_]+").unwrap());

/// Lowercase, drop accents, turn whitespace/period/underscore runs into a
/// single `_` and trim `_` from both ends.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    // `İ` lowercases to `i` + combining dot, so lowercase again after the
    // marks are gone to stay idempotent.
    let folded: String = lower
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    SEPARATORS
        .replace_all(&folded, "_")
        .trim_matches('_')
        .to_string()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
