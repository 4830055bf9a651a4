//! Merge of the base token configuration with the site's overrides.

use folio_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dark_mode::DarkMode;

pub const DARK_MODE_KEY: &str = "darkMode";
pub const CONTENT_KEY: &str = "content";

/// Attribute selector set by the site's theme toggle.
pub const DARK_MODE_SELECTOR: &str = "[data-theme=\"dark\"]";

/// Files scanned for utility-class usage.
pub const CONTENT_GLOBS: &[&str] = &["./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}"];

/// Final configuration handed to the CSS build pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleConfig(Map<String, Value>);

/// The dark-mode strategy this site always uses.
pub fn site_dark_mode() -> DarkMode {
    DarkMode::Selector(Some(DARK_MODE_SELECTOR.to_string()))
}

/// Build the style configuration from a base token configuration.
///
/// Every key of `base` is kept except `darkMode` and `content`, which are
/// always replaced by the site's values. `base` is not modified.
pub fn build_style_config(base: &Map<String, Value>) -> StyleConfig {
    let mut merged = base.clone();

    if let Some(previous) = merged.insert(DARK_MODE_KEY.to_string(), site_dark_mode().to_value())
    {
        tracing::debug!(previous = %previous, "overriding base darkMode");
    }
    if merged
        .insert(CONTENT_KEY.to_string(), Value::from(CONTENT_GLOBS.to_vec()))
        .is_some()
    {
        tracing::debug!("overriding base content globs");
    }

    StyleConfig(merged)
}

impl StyleConfig {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn dark_mode(&self) -> Option<DarkMode> {
        self.0.get(DARK_MODE_KEY).map(DarkMode::from_value)
    }

    /// Content globs, in declaration order.
    pub fn content(&self) -> Vec<&str> {
        self.0
            .get(CONTENT_KEY)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test base must be an object"),
        }
    }

    #[test]
    fn test_media_base_becomes_selector() {
        let base = map(json!({ "darkMode": "media", "colors": { "brand": "#123456" } }));

        let config = build_style_config(&base);

        assert_eq!(
            config.into_value(),
            json!({
                "darkMode": ["selector", "[data-theme=\"dark\"]"],
                "colors": { "brand": "#123456" },
                "content": ["./src/**/*.{astro,html,js,jsx,md,mdx,svelte,ts,tsx,vue}"],
            })
        );
    }

    #[test]
    fn test_base_keys_pass_through() {
        let base = map(json!({
            "theme": { "extend": { "spacing": { "18": "4.5rem" } } },
            "fontFamily": { "sans": ["Inter", "sans-serif"] },
            "plugins": [],
            "content": ["./legacy/**/*.html"],
        }));

        let config = build_style_config(&base);

        for (key, value) in &base {
            if key == CONTENT_KEY || key == DARK_MODE_KEY {
                continue;
            }
            assert_eq!(config.get(key), Some(value), "key {key} changed");
        }
        assert_eq!(config.content(), CONTENT_GLOBS.to_vec());
        assert_eq!(config.dark_mode(), Some(site_dark_mode()));
        assert_eq!(config.keys().count(), base.len() + 1);
    }

    #[test]
    fn test_empty_base() {
        let config = build_style_config(&Map::new());
        let keys: Vec<_> = config.keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"darkMode"));
        assert!(keys.contains(&"content"));
    }

    #[test]
    fn test_base_is_not_mutated_and_merge_is_idempotent() {
        let base = map(json!({ "darkMode": "class", "colors": { "ink": "#000" } }));
        let snapshot = base.clone();

        let first = build_style_config(&base);
        let second = build_style_config(&base);

        assert_eq!(base, snapshot);
        assert_eq!(first, second);
        assert_eq!(build_style_config(first.as_map()), first);
    }

    #[test]
    fn test_to_json_pretty() {
        let config = build_style_config(&Map::new());
        let rendered = config.to_json_pretty().expect("render");
        let reparsed: StyleConfig = serde_json::from_str(&rendered).expect("parse");
        assert_eq!(reparsed, config);
        assert!(rendered.contains("[data-theme=\\\"dark\\\"]"));
    }
}
