use unicode_normalization::UnicodeNormalization;

/// Normalize a string for search and matching
/// - Lowercase
/// - Unicode NFD decomposition
/// - Drop combining diacritical marks (U+0300..=U+036F)
///
/// Applied identically to item fields and user queries, so "café" and "cafe"
/// match in either direction.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}
