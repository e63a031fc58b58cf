use crate::catalog::CatalogFile;
use crate::error::{Error, Result};
use crate::instruments::canonicalize_instrumentation;
use crate::schema_validation::validate_catalog_json;
use crate::validation::validate_catalog;
use std::fs;
use std::path::Path;
use tracing::info;

/// Load a catalog from a JSON file
///
/// The raw JSON is checked against the catalog schema before it is
/// deserialized, then instrument names are canonicalized and the items are
/// validated.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents)?;

    info!(
        path = %path.display(),
        items = catalog.items.len(),
        category = %catalog.category,
        "catalog loaded"
    );
    Ok(catalog)
}

/// Parse catalog JSON text; see [`load_catalog`]
pub fn parse_catalog(contents: &str) -> Result<CatalogFile> {
    let raw: serde_json::Value = serde_json::from_str(contents)?;
    validate_catalog_json(&raw).map_err(Error::Validation)?;

    let mut catalog: CatalogFile = serde_json::from_value(raw)?;
    for item in catalog.items.iter_mut() {
        canonicalize_instrumentation(&mut item.instrumentation);
    }

    validate_catalog(&catalog.items).map_err(Error::Validation)?;
    Ok(catalog)
}
