use serde_json::{json, Value};

/// Structural schema for a catalog file
pub fn catalog_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Repertoire catalog",
        "type": "object",
        "required": ["items"],
        "properties": {
            "category": {"type": "string"},
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "title"],
                    "properties": {
                        "id": {"type": "integer"},
                        "title": {"type": "string"},
                        "composerFullName": {"type": "string"},
                        "composerLastName": {"type": "string"},
                        "composerFirstName": {"type": "string"},
                        "level": {"type": "string"},
                        "instrumentation": {"type": "array", "items": {"type": "string"}},
                        "nationality": {"type": "array", "items": {"type": "string"}},
                        "compositionYear": {"type": "string"},
                        "duration": {"type": ["string", "null"]},
                        "techniqueFocus": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        }
    })
}

/// Validate data against a JSON Schema
/// Returns Ok(()) if valid, Err with every validation error otherwise
pub fn validate_against_schema(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let compiled = jsonschema::validator_for(schema)
        .map_err(|e| vec![format!("Schema compilation error: {}", e)])?;

    let errors: Vec<String> = compiled
        .iter_errors(data)
        .map(|error| {
            let path_str = error.instance_path.to_string();
            let location = if path_str.is_empty() {
                "root".to_string()
            } else {
                path_str
            };
            format!("{} at {}", error, location)
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate raw catalog JSON against [`catalog_schema`]
pub fn validate_catalog_json(data: &Value) -> Result<(), Vec<String>> {
    validate_against_schema(&catalog_schema(), data)
}
