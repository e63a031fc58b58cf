// Public modules
pub mod catalog;
pub mod config;
pub mod error;
pub mod filtering;
pub mod instruments;
pub mod io;
pub mod levels;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod pipeline;
pub mod query;
pub mod schema_validation;
pub mod session;
pub mod sorting;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use catalog::{
    composer_vocabulary, nationality_vocabulary, technique_vocabulary, CatalogFile,
    CatalogSnapshot, CatalogSource, JsonCatalog,
};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use filtering::{apply_filters, matches_filters, FacetPredicate};
pub use instruments::{canonical_instrument, InstrumentMatcher};
pub use io::{load_catalog, parse_catalog};
pub use levels::{level_description, Level};
pub use models::CatalogItem;
pub use normalize::normalize;
pub use pagination::{clamp_page, page_labels, page_slice, total_pages, PageLabel, Viewport};
pub use pipeline::{browse, BrowsePage};
pub use query::{from_query_string, to_query_string, MemoryHistory, QuerySync, UrlHistory};
pub use schema_validation::{validate_against_schema, validate_catalog_json};
pub use session::{GuestSession, LocalSession, SessionCapability};
pub use sorting::{compare, sort_items, toggle_sort, SortDirection, SortField, SortSpec};
pub use state::{apply_action, Action, FilterState, ViewMode, YearRange, DEFAULT_YEAR_BOUNDS};
pub use validation::{validate_catalog, validate_path_exists};
