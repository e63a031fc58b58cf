//! Filter state and the reducer that produces each new state
//!
//! A [`FilterState`] is never mutated in place by consumers: every
//! interaction is an [`Action`] and [`apply_action`] returns the next state.

use std::collections::BTreeSet;

use crate::instruments::canonical_instrument;
use crate::sorting::{toggle_sort, SortField, SortSpec};

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Snap both ends into `bounds`, then keep `min <= max` by snapping the
    /// offending end to the other one
    pub fn clamped_to(self, bounds: YearRange) -> YearRange {
        let min = self.min.max(bounds.min).min(bounds.max);
        let max = self.max.min(bounds.max).max(min);
        YearRange { min, max }
    }
}

/// Absolute year limits of the year slider
pub const DEFAULT_YEAR_BOUNDS: YearRange = YearRange::new(1600, 2025);

/// Presentation mode, persisted alongside the filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Card grid; "card" on the wire
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_query_value(self) -> &'static str {
        match self {
            ViewMode::Grid => "card",
            ViewMode::List => "list",
        }
    }

    pub fn from_query_value(s: &str) -> Option<ViewMode> {
        match s {
            "card" | "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

/// Everything that determines which catalog items are shown, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub composers: BTreeSet<String>,
    pub levels: BTreeSet<String>,
    pub instruments: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    pub technique_focus: BTreeSet<String>,
    pub years: YearRange,
    /// Absolute limits `years` is kept within
    pub year_bounds: YearRange,
    pub sort: Option<SortSpec>,
    /// 1-based
    pub page: usize,
    pub view_mode: ViewMode,
}

impl FilterState {
    /// Default state: no facets, full year range, no sort, first page
    pub fn new(year_bounds: YearRange) -> Self {
        Self {
            query: String::new(),
            composers: BTreeSet::new(),
            levels: BTreeSet::new(),
            instruments: BTreeSet::new(),
            countries: BTreeSet::new(),
            technique_focus: BTreeSet::new(),
            years: year_bounds,
            year_bounds,
            sort: None,
            page: 1,
            view_mode: ViewMode::default(),
        }
    }

    /// True if any facet or the free-text query constrains results
    pub fn has_filters(&self) -> bool {
        !self.query.is_empty()
            || !self.composers.is_empty()
            || !self.levels.is_empty()
            || !self.instruments.is_empty()
            || !self.countries.is_empty()
            || !self.technique_focus.is_empty()
            || self.years != self.year_bounds
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(DEFAULT_YEAR_BOUNDS)
    }
}

/// A single user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetQuery(String),
    ToggleComposer(String),
    ToggleLevel(String),
    ToggleInstrument(String),
    ToggleCountry(String),
    ToggleTechniqueFocus(String),
    SetMinYear(i32),
    SetMaxYear(i32),
    SetYearRange(YearRange),
    ToggleSort(SortField),
    SetPage(usize),
    SetViewMode(ViewMode),
    ClearFilters,
    /// Replace the whole state at once, e.g. from the query string
    Hydrate(FilterState),
}

/// Produce the state that follows `action`
///
/// Actions that change the result set return to page 1.
pub fn apply_action(state: &FilterState, action: Action) -> FilterState {
    let mut next = state.clone();

    match action {
        Action::SetQuery(query) => {
            next.query = query;
            next.page = 1;
        }
        Action::ToggleComposer(value) => {
            toggle(&mut next.composers, value);
            next.page = 1;
        }
        Action::ToggleLevel(value) => {
            toggle(&mut next.levels, value);
            next.page = 1;
        }
        Action::ToggleInstrument(value) => {
            toggle(&mut next.instruments, canonical_instrument(&value));
            next.page = 1;
        }
        Action::ToggleCountry(value) => {
            toggle(&mut next.countries, value);
            next.page = 1;
        }
        Action::ToggleTechniqueFocus(value) => {
            toggle(&mut next.technique_focus, value);
            next.page = 1;
        }
        Action::SetMinYear(min) => {
            next.years.min = min.max(next.year_bounds.min).min(next.years.max);
            next.page = 1;
        }
        Action::SetMaxYear(max) => {
            next.years.max = max.min(next.year_bounds.max).max(next.years.min);
            next.page = 1;
        }
        Action::SetYearRange(range) => {
            next.years = range.clamped_to(next.year_bounds);
            next.page = 1;
        }
        Action::ToggleSort(field) => {
            next.sort = Some(toggle_sort(state.sort, field));
        }
        Action::SetPage(page) => {
            next.page = page.max(1);
        }
        Action::SetViewMode(mode) => {
            next.view_mode = mode;
        }
        Action::ClearFilters => {
            let cleared = FilterState::new(state.year_bounds);
            next = FilterState {
                sort: state.sort,
                view_mode: state.view_mode,
                ..cleared
            };
        }
        Action::Hydrate(hydrated) => {
            next = hydrated;
        }
    }

    next
}

/// Blank values are not selections and are ignored
fn toggle(set: &mut BTreeSet<String>, value: String) {
    if value.trim().is_empty() {
        return;
    }
    if !set.remove(&value) {
        set.insert(value);
    }
}
