use repcat_core::{
    apply_action, browse, Action, BrowsePage, CatalogSnapshot, EngineConfig,
    FilterState, JsonCatalog, MemoryHistory, QuerySync, SessionCapability, Viewport,
};
use std::path::PathBuf;
use tracing::debug;

/// Application state for one browsing session
pub struct AppState {
    pub config: EngineConfig,
    /// Catalog snapshot, fetched once
    pub snapshot: Option<CatalogSnapshot>,
    /// Instrument category of the loaded catalog
    pub category: Option<String>,
    /// Path to the current catalog file
    pub current_file: Option<PathBuf>,
    /// Active filters, sort and page
    pub filters: FilterState,
    /// Mirrors `filters` into a shareable query string
    pub sync: QuerySync<MemoryHistory>,
    pub session: Box<dyn SessionCapability>,
    pub viewport: Viewport,
}

impl AppState {
    pub fn new(config: EngineConfig, session: Box<dyn SessionCapability>) -> Self {
        let year_bounds = config.year_bounds();
        Self {
            config,
            snapshot: None,
            category: None,
            current_file: None,
            filters: FilterState::new(year_bounds),
            sync: QuerySync::new(MemoryHistory::default(), year_bounds),
            session,
            viewport: Viewport::default(),
        }
    }

    /// Load a catalog file and take the snapshot
    pub fn load_from_file(&mut self, path: PathBuf) -> repcat_core::Result<()> {
        let source = JsonCatalog::open(&path)?;
        let snapshot = CatalogSnapshot::fetch(&source)?;

        self.category = Some(source.category().to_string());
        self.snapshot = Some(snapshot);
        self.current_file = Some(path);

        Ok(())
    }

    /// Apply the initial query string in one batch
    pub fn hydrate(&mut self, query: &str) {
        if let Some(state) = self.sync.load(query) {
            self.filters = apply_action(&self.filters, Action::Hydrate(state));
            self.sync.persist(&self.filters);
        }
    }

    /// Apply a user action and mirror the result into the query string
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        self.filters = apply_action(&self.filters, action);
        self.sync.persist(&self.filters);
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size(self.viewport)
    }

    /// The page for the current filters, None before a catalog is loaded
    pub fn current_page(&self) -> Option<BrowsePage<'_>> {
        self.snapshot
            .as_ref()
            .map(|snapshot| browse(snapshot, &self.filters, self.page_size()))
    }

    /// Snap an out-of-range page onto the one actually shown, so the
    /// shareable query matches the view
    pub fn settle_page(&mut self) {
        let shown = self.current_page().map(|page| page.page);
        if let Some(page) = shown.filter(|page| *page != self.filters.page) {
            debug!(requested = self.filters.page, shown = page, "page out of range");
            self.dispatch(Action::SetPage(page));
        }
    }

    /// Query string that reproduces the current view
    pub fn shareable_query(&self) -> &str {
        &self.sync.history().current
    }

    /// Heading with category and file name
    pub fn get_title(&self) -> String {
        let file_name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("no catalog");

        match self.category.as_deref() {
            Some(category) if !category.is_empty() => {
                format!("Repertoire - {} ({})", category, file_name)
            }
            _ => format!("Repertoire - {}", file_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcat_core::{GuestSession, LocalSession, SortField};
    use std::io::Write;

    fn catalog_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"category": "cello", "items": [
                {{"id": 1, "title": "Kol Nidrei", "composerFullName": "Max Bruch",
                  "composerLastName": "Bruch", "level": "Advanced", "compositionYear": "1881"}},
                {{"id": 2, "title": "The Swan", "composerFullName": "Camille Saint-Saëns",
                  "composerLastName": "Saint-Saëns", "level": "Intermediate", "compositionYear": "1886"}}
            ]}}"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_load_and_browse() {
        let file = catalog_file();
        let mut state = AppState::new(EngineConfig::default(), Box::new(GuestSession));
        assert!(state.current_page().is_none());

        state.load_from_file(file.path().to_path_buf()).unwrap();
        let page = state.current_page().unwrap();
        let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
        // Initial order is by level
        assert_eq!(ids, vec![2, 1]);
        assert!(state.get_title().starts_with("Repertoire - cello ("));
    }

    #[test]
    fn test_dispatch_mirrors_query_string() {
        let mut state = AppState::new(EngineConfig::default(), Box::new(LocalSession::new("a")));
        state.hydrate("viewMode=list");
        state.dispatch(Action::ToggleSort(SortField::Title));

        assert!(state.shareable_query().contains("viewMode=list"));
        assert!(state.shareable_query().contains("sortField=title"));
    }

    #[test]
    fn test_out_of_range_page_settles_in_link() {
        let file = catalog_file();
        let mut state = AppState::new(EngineConfig::default(), Box::new(GuestSession));
        state.load_from_file(file.path().to_path_buf()).unwrap();
        state.hydrate("page=9");
        assert_eq!(state.filters.page, 9);

        state.settle_page();
        assert_eq!(state.filters.page, 1);
        assert_eq!(state.current_page().unwrap().page, 1);
        assert!(state.shareable_query().contains("page=1"));
        assert!(!state.shareable_query().contains("page=9"));
    }

    #[test]
    fn test_missing_file_leaves_state_empty() {
        let mut state = AppState::new(EngineConfig::default(), Box::new(GuestSession));
        assert!(state.load_from_file(PathBuf::from("/no/such/catalog.json")).is_err());
        assert!(state.snapshot.is_none());
        assert_eq!(state.get_title(), "Repertoire - no catalog");
    }
}
