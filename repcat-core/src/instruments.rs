//! Instrument descriptor canonicalization and matching
//!
//! Descriptors come from two places: facet selections ("Cello and Piano",
//! "Cello Duet", "Cello Solo") and the instrument names stored on items.
//! Both go through [`canonical_instrument`] so "Cello Solo" and "Cello" are
//! one and the same everywhere.

use regex::Regex;
use std::sync::OnceLock;

/// Map a descriptor to its canonical spelling
///
/// "Cello Solo" (any case, surrounding whitespace ignored) becomes "Cello";
/// everything else is returned trimmed and otherwise untouched.
pub fn canonical_instrument(descriptor: &str) -> String {
    let trimmed = descriptor.trim();
    if trimmed.eq_ignore_ascii_case("cello solo") {
        "Cello".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parsed form of an instrument facet value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentMatcher {
    /// Exactly one instrument, equal to the name
    Solo(String),
    /// Exactly two instruments, both equal to the name
    Duet(String),
    /// Every listed part must appear somewhere in the instrumentation
    Ensemble(Vec<String>),
}

impl InstrumentMatcher {
    /// Parse a facet value; names are lowercased for comparison
    pub fn parse(descriptor: &str) -> Self {
        let canonical = canonical_instrument(descriptor).to_lowercase();

        let parts: Vec<String> = and_separator()
            .split(&canonical)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() > 1 {
            return InstrumentMatcher::Ensemble(parts);
        }

        if let Some(name) = canonical.strip_suffix(" duet") {
            return InstrumentMatcher::Duet(name.trim().to_string());
        }

        InstrumentMatcher::Solo(canonical)
    }

    /// Test an item's instrumentation list
    pub fn matches(&self, instrumentation: &[String]) -> bool {
        let lowered: Vec<String> = instrumentation
            .iter()
            .map(|i| canonical_instrument(i).to_lowercase())
            .collect();

        match self {
            InstrumentMatcher::Solo(name) => lowered.len() == 1 && lowered[0] == *name,
            InstrumentMatcher::Duet(name) => {
                lowered.len() == 2 && lowered.iter().all(|i| i == name)
            }
            InstrumentMatcher::Ensemble(parts) => {
                parts.iter().all(|part| lowered.iter().any(|i| i == part))
            }
        }
    }
}

/// Canonicalize every entry of an item's instrumentation
pub fn canonicalize_instrumentation(instrumentation: &mut [String]) {
    for entry in instrumentation.iter_mut() {
        *entry = canonical_instrument(entry);
    }
}

fn and_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+and\s+").expect("separator regex is valid"))
}
