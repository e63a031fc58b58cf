//! Catalog data provider and the in-memory snapshot the engine runs over

use crate::error::Result;
use crate::instruments::canonicalize_instrumentation;
use crate::io::load_catalog;
use crate::models::CatalogItem;
use crate::sorting::{compare_level, compare_text, SortDirection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// On-disk catalog for one instrument category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub category: String,
    pub items: Vec<CatalogItem>,
}

/// Whole-collection reads offered by the catalog data provider
///
/// Every call returns the full collection; there is no server-side paging
/// or filtering.
pub trait CatalogSource {
    fn items(&self) -> Result<Vec<CatalogItem>>;

    /// Distinct composer full names
    fn composers(&self) -> Result<Vec<String>>;

    /// Distinct composer nationalities
    fn nationalities(&self) -> Result<Vec<String>>;
}

/// File-backed provider
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    file: CatalogFile,
}

impl JsonCatalog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            file: load_catalog(path)?,
        })
    }

    pub fn from_file(file: CatalogFile) -> Self {
        Self { file }
    }

    pub fn category(&self) -> &str {
        &self.file.category
    }
}

impl CatalogSource for JsonCatalog {
    fn items(&self) -> Result<Vec<CatalogItem>> {
        Ok(self.file.items.clone())
    }

    fn composers(&self) -> Result<Vec<String>> {
        Ok(composer_vocabulary(&self.file.items))
    }

    fn nationalities(&self) -> Result<Vec<String>> {
        Ok(nationality_vocabulary(&self.file.items))
    }
}

/// Immutable catalog fetched once per browsing session
///
/// Items are put in ascending level order on construction; with no sort
/// selected this is the order the listing shows. Instrument names are
/// canonicalized here whatever the source.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    items: Vec<CatalogItem>,
}

impl CatalogSnapshot {
    pub fn new(mut items: Vec<CatalogItem>) -> Self {
        for item in items.iter_mut() {
            canonicalize_instrumentation(&mut item.instrumentation);
        }
        items.sort_by(|a, b| compare_level(a, b, SortDirection::Ascending));
        Self { items }
    }

    /// One-shot read from a provider
    pub fn fetch(source: &dyn CatalogSource) -> Result<Self> {
        Ok(Self::new(source.items()?))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Distinct composer full names, ordered by last name then full name
pub fn composer_vocabulary(items: &[CatalogItem]) -> Vec<String> {
    let mut by_name: BTreeMap<&str, &str> = BTreeMap::new();
    for item in items {
        if !item.composer_full_name.is_empty() {
            by_name
                .entry(item.composer_full_name.as_str())
                .or_insert(item.composer_last_name.as_str());
        }
    }

    let mut names: Vec<(&str, &str)> = by_name.into_iter().collect();
    names.sort_by(|(a_full, a_last), (b_full, b_last)| {
        compare_text(a_last, b_last).then_with(|| compare_text(a_full, b_full))
    });
    names.into_iter().map(|(full, _)| full.to_string()).collect()
}

/// Distinct nationalities, ordered by normalized text
pub fn nationality_vocabulary(items: &[CatalogItem]) -> Vec<String> {
    let mut names: Vec<String> = items
        .iter()
        .flat_map(|item| item.nationality.iter())
        .filter(|n| !n.trim().is_empty())
        .cloned()
        .collect();
    names.sort_by(|a, b| compare_text(a, b));
    names.dedup();
    names
}

/// Distinct technique tags, ordered by normalized text
pub fn technique_vocabulary(items: &[CatalogItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = items.iter().flat_map(|item| item.technique_tags()).collect();
    let mut tags: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    tags.sort_by(|a, b| compare_text(a, b));
    tags
}
