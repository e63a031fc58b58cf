//! URL query-string codec for [`FilterState`] and the sync driver
//!
//! Keys: `filter`, `selectedComposers`, `selectedLevels`,
//! `selectedInstruments`, `selectedCountries`, `selectedTechniqueFocus`,
//! `minYear`, `maxYear`, `page`, `viewMode`, `sortField`, `sortDirection`.
//! Array keys repeat (`selectedLevels=Beginner&selectedLevels=Advanced`).
//! Unknown keys and malformed values are ignored.

use std::collections::BTreeSet;

use tracing::{debug, warn};
use url::form_urlencoded;

use crate::instruments::canonical_instrument;
use crate::sorting::{SortDirection, SortField, SortSpec};
use crate::state::{FilterState, ViewMode, YearRange};

pub const KEY_FILTER: &str = "filter";
pub const KEY_COMPOSERS: &str = "selectedComposers";
pub const KEY_LEVELS: &str = "selectedLevels";
pub const KEY_INSTRUMENTS: &str = "selectedInstruments";
pub const KEY_COUNTRIES: &str = "selectedCountries";
pub const KEY_TECHNIQUE_FOCUS: &str = "selectedTechniqueFocus";
pub const KEY_MIN_YEAR: &str = "minYear";
pub const KEY_MAX_YEAR: &str = "maxYear";
pub const KEY_PAGE: &str = "page";
pub const KEY_VIEW_MODE: &str = "viewMode";
pub const KEY_SORT_FIELD: &str = "sortField";
pub const KEY_SORT_DIRECTION: &str = "sortDirection";

/// Serialize the full state as an `application/x-www-form-urlencoded` string
///
/// Empty facets and an empty query are left out; year bounds, page and view
/// mode are always written.
pub fn to_query_string(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());

    if !state.query.is_empty() {
        out.append_pair(KEY_FILTER, &state.query);
    }

    for (key, values) in [
        (KEY_COMPOSERS, &state.composers),
        (KEY_LEVELS, &state.levels),
        (KEY_INSTRUMENTS, &state.instruments),
        (KEY_COUNTRIES, &state.countries),
        (KEY_TECHNIQUE_FOCUS, &state.technique_focus),
    ] {
        for value in values {
            out.append_pair(key, value);
        }
    }

    out.append_pair(KEY_MIN_YEAR, &state.years.min.to_string());
    out.append_pair(KEY_MAX_YEAR, &state.years.max.to_string());
    out.append_pair(KEY_PAGE, &state.page.to_string());
    out.append_pair(KEY_VIEW_MODE, state.view_mode.as_query_value());

    if let Some(sort) = state.sort {
        out.append_pair(KEY_SORT_FIELD, sort.field.as_query_value());
        out.append_pair(KEY_SORT_DIRECTION, sort.direction.as_query_value());
    }

    out.finish()
}

/// Parse a query string into a state, starting from defaults within `year_bounds`
///
/// A leading `?` is accepted. Never fails: anything unrecognized falls back
/// to the default for that field.
pub fn from_query_string(query: &str, year_bounds: YearRange) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut state = FilterState::new(year_bounds);
    let mut min_year = None;
    let mut max_year = None;
    let mut sort_field = None;
    let mut sort_direction = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.into_owned();
        match &*key {
            KEY_FILTER => state.query = value,
            KEY_COMPOSERS => insert_value(&mut state.composers, value),
            KEY_LEVELS => insert_value(&mut state.levels, value),
            KEY_INSTRUMENTS => insert_value(&mut state.instruments, canonical_instrument(&value)),
            KEY_COUNTRIES => insert_value(&mut state.countries, value),
            KEY_TECHNIQUE_FOCUS => insert_value(&mut state.technique_focus, value),
            KEY_MIN_YEAR => min_year = parse_number(KEY_MIN_YEAR, &value),
            KEY_MAX_YEAR => max_year = parse_number(KEY_MAX_YEAR, &value),
            KEY_PAGE => {
                if let Some(page) = parse_number::<usize>(KEY_PAGE, &value) {
                    state.page = page.max(1);
                }
            }
            KEY_VIEW_MODE => match ViewMode::from_query_value(&value) {
                Some(mode) => state.view_mode = mode,
                None => warn!(value = %value, "ignoring unknown viewMode"),
            },
            KEY_SORT_FIELD => sort_field = SortField::from_query_value(&value),
            KEY_SORT_DIRECTION => sort_direction = SortDirection::from_query_value(&value),
            other => debug!(key = other, "ignoring unrecognized query parameter"),
        }
    }

    state.years = YearRange::new(
        min_year.unwrap_or(year_bounds.min),
        max_year.unwrap_or(year_bounds.max),
    )
    .clamped_to(year_bounds);

    state.sort = sort_field.map(|field| SortSpec::new(field, sort_direction.unwrap_or_default()));

    state
}

fn insert_value(set: &mut BTreeSet<String>, value: String) {
    if !value.is_empty() {
        set.insert(value);
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!(key, value, "ignoring unparseable number");
            None
        }
    }
}

/// Routing-layer capability for rewriting the current URL in place
pub trait UrlHistory {
    /// Replace the query string of the current entry; must not add a
    /// history entry, reload, or navigate
    fn replace_query(&mut self, query: &str);
}

/// In-memory URL holder, useful for consumers without a browser
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    pub current: String,
    /// Number of replace calls received
    pub replacements: usize,
}

impl UrlHistory for MemoryHistory {
    fn replace_query(&mut self, query: &str) {
        self.current = query.to_string();
        self.replacements += 1;
    }
}

/// Bidirectional sync between a [`FilterState`] and the URL
///
/// `load` runs once, when the routing layer first becomes ready. After that
/// every state change goes through `persist`.
#[derive(Debug)]
pub struct QuerySync<H: UrlHistory> {
    history: H,
    year_bounds: YearRange,
    hydrated: bool,
    last_written: Option<String>,
}

impl<H: UrlHistory> QuerySync<H> {
    pub fn new(history: H, year_bounds: YearRange) -> Self {
        Self {
            history,
            year_bounds,
            hydrated: false,
            last_written: None,
        }
    }

    /// Hydrate from the initial query string
    ///
    /// Returns None when already hydrated; later calls are ignored.
    pub fn load(&mut self, query: &str) -> Option<FilterState> {
        if self.hydrated {
            return None;
        }
        self.hydrated = true;
        self.last_written = Some(query.strip_prefix('?').unwrap_or(query).to_string());

        let state = from_query_string(query, self.year_bounds);
        debug!(query, "hydrated filter state from query string");
        Some(state)
    }

    /// Mirror `state` into the URL; a no-op before hydration or when the
    /// serialized form is unchanged. Returns true if the URL was replaced.
    pub fn persist(&mut self, state: &FilterState) -> bool {
        if !self.hydrated {
            return false;
        }

        let query = to_query_string(state);
        if self.last_written.as_deref() == Some(query.as_str()) {
            return false;
        }

        self.history.replace_query(&query);
        self.last_written = Some(query);
        true
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn history(&self) -> &H {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{apply_action, Action, DEFAULT_YEAR_BOUNDS};

    fn bounds() -> YearRange {
        DEFAULT_YEAR_BOUNDS
    }

    #[test]
    fn test_round_trip() {
        let mut state = FilterState::default();
        for action in [
            Action::SetQuery("élégie & co".into()),
            Action::ToggleComposer("Gabriel Fauré".into()),
            Action::ToggleComposer("Johann Sebastian Bach".into()),
            Action::ToggleLevel("Late Intermediate".into()),
            Action::ToggleInstrument("Cello and Piano".into()),
            Action::ToggleCountry("French".into()),
            Action::ToggleTechniqueFocus("Thumb position".into()),
            Action::SetYearRange(YearRange::new(1700, 1900)),
            Action::ToggleSort(SortField::Duration),
            Action::ToggleSort(SortField::Duration),
            Action::SetPage(3),
            Action::SetViewMode(ViewMode::List),
        ] {
            state = apply_action(&state, action);
        }

        let query = to_query_string(&state);
        assert_eq!(from_query_string(&query, bounds()), state);
    }

    #[test]
    fn test_blank_selection_round_trips() {
        let state = apply_action(&FilterState::default(), Action::ToggleComposer(String::new()));
        let query = to_query_string(&state);
        assert_eq!(from_query_string(&query, bounds()), state);
    }

    #[test]
    fn test_default_round_trip() {
        let state = FilterState::default();
        let query = to_query_string(&state);
        assert_eq!(query, "minYear=1600&maxYear=2025&page=1&viewMode=card");
        assert_eq!(from_query_string(&query, bounds()), state);
    }

    #[test]
    fn test_single_and_repeated_array_values() {
        let single = from_query_string("selectedLevels=Beginner", bounds());
        assert_eq!(single.levels.len(), 1);

        let many = from_query_string(
            "?selectedLevels=Beginner&selectedLevels=Advanced&selectedCountries=Czech",
            bounds(),
        );
        assert!(many.levels.contains("Beginner"));
        assert!(many.levels.contains("Advanced"));
        assert!(many.countries.contains("Czech"));
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let state = from_query_string(
            "minYear=abc&maxYear=&page=-2&viewMode=table&sortField=tempo&sortDirection=up&bogus=1",
            bounds(),
        );
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_sort_direction_defaults_to_ascending() {
        let state = from_query_string("sortField=title&sortDirection=sideways", bounds());
        assert_eq!(
            state.sort,
            Some(SortSpec::new(SortField::Title, SortDirection::Ascending))
        );

        // A direction alone is meaningless
        let state = from_query_string("sortDirection=desc", bounds());
        assert!(state.sort.is_none());
    }

    #[test]
    fn test_inverted_year_range_is_clamped() {
        let state = from_query_string("minYear=1950&maxYear=1800", bounds());
        assert_eq!(state.years, YearRange::new(1950, 1950));

        let state = from_query_string("minYear=1000&maxYear=3000", bounds());
        assert_eq!(state.years, bounds());
    }

    #[test]
    fn test_cello_solo_in_query_is_canonical() {
        let state = from_query_string("selectedInstruments=Cello+Solo", bounds());
        assert!(state.instruments.contains("Cello"));
    }

    #[test]
    fn test_page_zero_becomes_one() {
        let state = from_query_string("page=0", bounds());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_sync_loads_once() {
        let mut sync = QuerySync::new(MemoryHistory::default(), bounds());
        assert!(!sync.is_hydrated());

        let state = sync.load("page=2&viewMode=list").unwrap();
        assert_eq!(state.page, 2);
        assert_eq!(state.view_mode, ViewMode::List);

        assert!(sync.load("page=5").is_none());
    }

    #[test]
    fn test_sync_persists_only_after_load_and_on_change() {
        let mut sync = QuerySync::new(MemoryHistory::default(), bounds());
        let state = FilterState::default();

        // Nothing is written before the initial load
        assert!(!sync.persist(&state));

        let loaded = sync.load("").unwrap();
        assert!(sync.persist(&loaded));
        assert_eq!(sync.history().replacements, 1);

        // Same state again is not rewritten
        assert!(!sync.persist(&loaded));
        assert_eq!(sync.history().replacements, 1);

        let next = apply_action(&loaded, Action::ToggleLevel("Beginner".into()));
        assert!(sync.persist(&next));
        assert_eq!(sync.history().replacements, 2);
        assert!(sync.history().current.contains("selectedLevels=Beginner"));
    }
}
