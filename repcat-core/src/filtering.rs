use crate::instruments::InstrumentMatcher;
use crate::models::CatalogItem;
use crate::normalize::normalize;
use crate::state::FilterState;
use std::collections::BTreeSet;

/// Facet predicates compiled from a [`FilterState`]
///
/// Normalizes the query and parses instrument descriptors once, so testing
/// a whole catalog does not redo that work per item.
#[derive(Debug)]
pub struct FacetPredicate<'a> {
    state: &'a FilterState,
    query: String,
    instruments: Vec<InstrumentMatcher>,
}

impl<'a> FacetPredicate<'a> {
    pub fn new(state: &'a FilterState) -> Self {
        Self {
            state,
            query: normalize(&state.query),
            instruments: state
                .instruments
                .iter()
                .map(|d| InstrumentMatcher::parse(d))
                .collect(),
        }
    }

    /// AND across facets; OR within the text match and within each facet
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let state = self.state;

        // Free text: title OR composer name
        if !self.query.is_empty()
            && !normalize(&item.title).contains(&self.query)
            && !normalize(&item.composer_full_name).contains(&self.query)
        {
            return false;
        }

        if !state.composers.is_empty() && !state.composers.contains(&item.composer_full_name) {
            return false;
        }

        if !state.levels.is_empty() && !state.levels.contains(&item.level) {
            return false;
        }

        if !state.countries.is_empty() && !intersects(&state.countries, &item.nationality) {
            return false;
        }

        if !self.instruments.is_empty()
            && !self
                .instruments
                .iter()
                .any(|m| m.matches(&item.instrumentation))
        {
            return false;
        }

        if !state.technique_focus.is_empty()
            && !item
                .technique_tags()
                .any(|tag| state.technique_focus.contains(tag))
        {
            return false;
        }

        // Unknown years never pass, even with the full default range
        match item.year() {
            Some(year) => state.years.contains(year),
            None => false,
        }
    }
}

/// Check if an item passes the given filter state
pub fn matches_filters(item: &CatalogItem, state: &FilterState) -> bool {
    FacetPredicate::new(state).matches(item)
}

/// Apply filters to a list of items, returning only those that match
pub fn apply_filters<'a>(items: &'a [CatalogItem], state: &FilterState) -> Vec<&'a CatalogItem> {
    let predicate = FacetPredicate::new(state);
    items.iter().filter(|item| predicate.matches(item)).collect()
}

fn intersects(selected: &BTreeSet<String>, values: &[String]) -> bool {
    values.iter().any(|v| selected.contains(v))
}
