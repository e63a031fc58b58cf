//! Filter → sort → paginate over a catalog snapshot

use crate::catalog::CatalogSnapshot;
use crate::filtering::apply_filters;
use crate::pagination::{clamp_page, page_labels, page_slice, total_pages, PageLabel};
use crate::models::CatalogItem;
use crate::sorting::sort_items;
use crate::state::FilterState;
use serde::Serialize;
use tracing::debug;

/// One rendered page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowsePage<'a> {
    pub items: Vec<&'a CatalogItem>,
    pub total_matches: usize,
    /// Page actually shown, after clamping
    pub page: usize,
    pub total_pages: usize,
    #[serde(skip)]
    pub labels: Vec<PageLabel>,
}

impl BrowsePage<'_> {
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// Run the full pipeline for one state
///
/// Recomputed from scratch for every state; the snapshot is never modified.
pub fn browse<'a>(
    snapshot: &'a CatalogSnapshot,
    state: &FilterState,
    page_size: usize,
) -> BrowsePage<'a> {
    let filtered = apply_filters(snapshot.items(), state);
    let ordered = match state.sort {
        Some(spec) => sort_items(&filtered, spec),
        None => filtered,
    };

    let total_matches = ordered.len();
    let total_pages = total_pages(total_matches, page_size);
    let page = clamp_page(state.page, total_pages);
    let items = page_slice(&ordered, page, page_size).to_vec();

    debug!(
        catalog = snapshot.len(),
        matches = total_matches,
        page,
        total_pages,
        "browse"
    );

    BrowsePage {
        items,
        total_matches,
        page,
        total_pages,
        labels: page_labels(page, total_pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sorting::SortField;
    use crate::state::{apply_action, Action};

    fn catalog(count: i64) -> CatalogSnapshot {
        let items = (1..=count)
            .map(|id| CatalogItem {
                id,
                title: format!("Piece {}", id),
                composer_full_name: "Anon".to_string(),
                composer_last_name: "Anon".to_string(),
                composer_first_name: String::new(),
                level: "Beginner".to_string(),
                instrumentation: vec!["Cello".to_string()],
                nationality: Vec::new(),
                composition_year: "1900".to_string(),
                duration: Some(format!("00:{:02}:00", id % 60)),
                technique_focus: Vec::new(),
            })
            .collect();
        CatalogSnapshot::new(items)
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let snapshot = catalog(20);
        let state = apply_action(&FilterState::default(), Action::SetPage(9));
        let page = browse(&snapshot, &state, 16);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 4);
    }

    #[test]
    fn test_sort_applies_before_slicing() {
        let snapshot = catalog(20);
        let state = apply_action(&FilterState::default(), Action::ToggleSort(SortField::Duration));
        let state = apply_action(&state, Action::ToggleSort(SortField::Duration));
        let page = browse(&snapshot, &state, 5);
        let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![20, 19, 18, 17, 16]);
    }

    #[test]
    fn test_no_sort_keeps_snapshot_order() {
        let snapshot = catalog(3);
        let page = browse(&snapshot, &FilterState::default(), 16);
        let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
