use serde::{Deserialize, Serialize};

/// Duration literal used by the catalog for "unknown duration"
pub const UNKNOWN_DURATION: &str = "00:00:00";

/// Year literal used by the catalog for "unknown composition year"
pub const UNKNOWN_YEAR: &str = "0000";

/// One piece of repertoire as delivered by the catalog data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub composer_full_name: String,
    #[serde(default)]
    pub composer_last_name: String,
    #[serde(default)]
    pub composer_first_name: String,
    #[serde(default)]
    pub level: String,
    /// Instrument names; order carries no meaning, length and content do
    #[serde(default)]
    pub instrumentation: Vec<String>,
    #[serde(default)]
    pub nationality: Vec<String>,
    #[serde(default)]
    pub composition_year: String,
    /// `HH:MM:SS`; absent or "00:00:00" means unknown
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub technique_focus: Vec<String>,
}

impl CatalogItem {
    /// Composition year as a positive integer, None for "0000", empty or unparseable
    pub fn year(&self) -> Option<i32> {
        parse_year(&self.composition_year)
    }

    /// Duration in whole seconds, None when the duration is unknown
    pub fn duration_seconds(&self) -> Option<u32> {
        self.duration.as_deref().and_then(parse_duration)
    }

    /// Technique tags with empty entries removed
    pub fn technique_tags(&self) -> impl Iterator<Item = &str> {
        self.technique_focus
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
    }
}

/// Parse a composition year string; only positive integers count
pub fn parse_year(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|y| *y > 0)
}

/// Parse an `HH:MM:SS` duration into total seconds
///
/// Returns None for the unknown sentinel, for anything not shaped like
/// three colon-separated numbers, and for a zero total.
pub fn parse_duration(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN_DURATION {
        return None;
    }

    let parts: Vec<&str> = raw.split(':').collect();
    if parts.len() != 3 {
        return None;
    }

    let hours: u32 = parts[0].parse().ok()?;
    let minutes: u32 = parts[1].parse().ok()?;
    let seconds: u32 = parts[2].parse().ok()?;

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    (total > 0).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 7,
            "title": "Après un rêve",
            "composerFullName": "Gabriel Fauré",
            "composerLastName": "Fauré",
            "level": "Intermediate",
            "instrumentation": ["Cello", "Piano"],
            "compositionYear": "1878"
        }))
        .unwrap();

        assert_eq!(item.id, 7);
        assert_eq!(item.composer_last_name, "Fauré");
        assert!(item.nationality.is_empty());
        assert!(item.duration.is_none());
        assert_eq!(item.year(), Some(1878));
    }

    #[test]
    fn test_parse_year_sentinels() {
        assert_eq!(parse_year("1905"), Some(1905));
        assert_eq!(parse_year(UNKNOWN_YEAR), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("c. 1900"), None);
        assert_eq!(parse_year("-12"), None);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("00:05:00"), Some(300));
        assert_eq!(parse_duration("01:02:03"), Some(3723));
        assert_eq!(parse_duration(UNKNOWN_DURATION), None);
        assert_eq!(parse_duration("5:00"), None);
        assert_eq!(parse_duration("aa:bb:cc"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn test_technique_tags_skip_empty() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 1,
            "title": "Etude",
            "techniqueFocus": ["", "Thumb position", "  "]
        }))
        .unwrap();

        let tags: Vec<&str> = item.technique_tags().collect();
        assert_eq!(tags, vec!["Thumb position"]);
    }
}
