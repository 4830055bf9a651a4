//! Reading the base token configuration from disk.

use std::path::Path;

use folio_core::{CoreError, Result, frontmatter::toml_to_json};
use serde_json::{Map, Value};

/// Read a base token configuration. The format follows the extension:
/// `.json`, `.yaml`/`.yml` or `.toml`.
///
/// Only the top level is checked (it must be a mapping); the contents are
/// handed through untouched.
pub fn read_base(path: &Path) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        CoreError::config_with_source(
            format!("Failed to read base style config: {}", path.display()),
            e,
        )
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let value: Value = match ext.as_str() {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml_to_json(toml::Value::Table(toml::from_str(&content)?)),
        other => {
            return Err(CoreError::config(format!(
                "Unsupported base style config format `{other}`: {}",
                path.display()
            )));
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CoreError::config(format!(
            "Base style config must be a mapping: {}",
            path.display()
        ))),
    }
}
