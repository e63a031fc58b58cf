use repcat_core::Error;
use std::path::Path;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_catalog_load_error(error: &Error, path: &Path) -> (String, String, String) {
    match error {
        Error::Validation(errors) => (
            "Validation Error".to_string(),
            "The catalog file has validation errors.".to_string(),
            errors.join("\n"),
        ),
        Error::Json(e) => (
            "Invalid JSON".to_string(),
            "The catalog file is not valid JSON.".to_string(),
            format!("{}\n\nPath: {}", e, path.display()),
        ),
        Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        Error::Io(e) if e.kind() == std::io::ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        other => (
            "Error Loading Catalog".to_string(),
            "Failed to load the catalog.".to_string(),
            other.to_string(),
        ),
    }
}

/// Map config errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_config_error(error: &Error, path: Option<&Path>) -> (String, String, String) {
    let location = path
        .map(|p| format!("\n\nConfig file: {}", p.display()))
        .unwrap_or_default();

    match error {
        Error::Toml(e) => (
            "Config Parse Error".to_string(),
            "The config file is not valid TOML.".to_string(),
            format!("{}{}", e, location),
        ),
        Error::Config(msg) => (
            "Invalid Config".to_string(),
            "The config file has inconsistent values.".to_string(),
            format!("{}{}", msg, location),
        ),
        other => (
            "Error Loading Config".to_string(),
            "Failed to load the config file.".to_string(),
            format!("{}{}", other, location),
        ),
    }
}

/// Map save-list errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_session_error(error: &Error, item_id: i64) -> (String, String, String) {
    match error {
        Error::NotAuthenticated => (
            "Not Logged In".to_string(),
            "Log in to save pieces to your list.".to_string(),
            format!("Item {} was not changed. Pass --user to log in.", item_id),
        ),
        other => (
            "Error Updating Saved List".to_string(),
            "The saved list could not be updated.".to_string(),
            other.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found() {
        let error = Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let (title, _, details) = map_catalog_load_error(&error, Path::new("cello.json"));
        assert_eq!(title, "File Not Found");
        assert!(details.contains("cello.json"));
    }

    #[test]
    fn test_validation_lists_every_error() {
        let error = Error::Validation(vec!["first".into(), "second".into()]);
        let (title, _, details) = map_catalog_load_error(&error, Path::new("cello.json"));
        assert_eq!(title, "Validation Error");
        assert_eq!(details, "first\nsecond");
    }

    #[test]
    fn test_config_error_mentions_path() {
        let error = Error::Config("page sizes must be at least 1".into());
        let (title, _, details) = map_config_error(&error, Some(Path::new("repcat.toml")));
        assert_eq!(title, "Invalid Config");
        assert!(details.ends_with("Config file: repcat.toml"));
    }

    #[test]
    fn test_guest_save() {
        let (title, _, details) = map_session_error(&Error::NotAuthenticated, 4);
        assert_eq!(title, "Not Logged In");
        assert!(details.contains("Item 4"));
    }
}
