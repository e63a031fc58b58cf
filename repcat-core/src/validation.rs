use crate::levels::Level;
use crate::models::CatalogItem;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Validate a loaded catalog
/// Returns Ok(()) if valid, or Err(Vec<String>) with validation errors
///
/// Unknown levels, years and durations are legitimate data and are not
/// reported here; the engine treats them as "unknown".
pub fn validate_catalog(items: &[CatalogItem]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, item) in items.iter().enumerate() {
        if !seen_ids.insert(item.id) {
            errors.push(format!("Item {} has duplicate id {}", index, item.id));
        }

        if item.title.trim().is_empty() {
            errors.push(format!("Item {} (id {}) has an empty title", index, item.id));
        }

        if !item.level.is_empty() && Level::from_label(&item.level).is_none() {
            debug!(id = item.id, level = %item.level, "level outside the curriculum");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate that a path exists and is a regular file
pub fn validate_path_exists(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Not a file: {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items(value: serde_json::Value) -> Vec<CatalogItem> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = items(json!([
            {"id": 1, "title": "Élégie", "level": "Advanced"},
            {"id": 2, "title": "Kol Nidrei", "level": "Grade 7"}
        ]));
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn test_duplicate_ids_and_empty_titles() {
        let catalog = items(json!([
            {"id": 1, "title": "Élégie"},
            {"id": 1, "title": "   "}
        ]));
        let errors = validate_catalog(&catalog).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("duplicate id 1"));
        assert!(errors[1].contains("empty title"));
    }

    #[test]
    fn test_validate_path_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_path_exists(dir.path()).is_err());
        assert!(validate_path_exists(&dir.path().join("missing.json")).is_err());

        let file = dir.path().join("catalog.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(validate_path_exists(&file).is_ok());
    }
}
