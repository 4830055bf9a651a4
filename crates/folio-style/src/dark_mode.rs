//! Typed view of a `darkMode` strategy.

use serde_json::Value;

/// How the utility-class generator decides that dark mode is active.
#[derive(Debug, Clone, PartialEq)]
pub enum DarkMode {
    /// Follow the `prefers-color-scheme` media query.
    Media,
    /// Legacy class strategy, optionally with a custom selector.
    Class(Option<String>),
    /// Selector strategy, optionally with a custom selector.
    Selector(Option<String>),
    /// Anything this crate does not model.
    Other(Value),
}

impl DarkMode {
    /// Read a strategy from its configuration form: either `"media"`,
    /// `"class"`, `"selector"` or a `[strategy, selector]` pair.
    pub fn from_value(value: &Value) -> Self {
        let parsed = match value {
            Value::String(s) => Self::from_parts(s, None),
            Value::Array(items) => match items.as_slice() {
                [Value::String(s)] => Self::from_parts(s, None),
                [Value::String(s), Value::String(sel)] => Self::from_parts(s, Some(sel.clone())),
                _ => None,
            },
            _ => None,
        };
        parsed.unwrap_or_else(|| Self::Other(value.clone()))
    }

    fn from_parts(strategy: &str, selector: Option<String>) -> Option<Self> {
        match (strategy, selector) {
            ("media", None) => Some(Self::Media),
            ("class", selector) => Some(Self::Class(selector)),
            ("selector", selector) => Some(Self::Selector(selector)),
            _ => None,
        }
    }

    /// Configuration form of this strategy.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Media => Value::from("media"),
            Self::Class(None) => Value::from("class"),
            Self::Class(Some(sel)) => Value::from(vec!["class", sel.as_str()]),
            Self::Selector(None) => Value::from("selector"),
            Self::Selector(Some(sel)) => Value::from(vec!["selector", sel.as_str()]),
            Self::Other(v) => v.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_value() {
        assert_eq!(DarkMode::from_value(&json!("media")), DarkMode::Media);
        assert_eq!(DarkMode::from_value(&json!("class")), DarkMode::Class(None));
        assert_eq!(
            DarkMode::from_value(&json!(["selector", "[data-theme=\"dark\"]"])),
            DarkMode::Selector(Some("[data-theme=\"dark\"]".into()))
        );
        assert_eq!(
            DarkMode::from_value(&json!(["class", ".night"])),
            DarkMode::Class(Some(".night".into()))
        );
        assert_eq!(DarkMode::from_value(&json!(false)), DarkMode::Other(json!(false)));
        assert_eq!(
            DarkMode::from_value(&json!(["variant", "&:is(.dark *)"])),
            DarkMode::Other(json!(["variant", "&:is(.dark *)"]))
        );
    }

    #[test]
    fn test_to_value_inverts_from_value() {
        for value in [
            json!("media"),
            json!("selector"),
            json!(["selector", "[data-theme=\"dark\"]"]),
            json!(["class", ".night"]),
            json!({ "unexpected": true }),
        ] {
            assert_eq!(DarkMode::from_value(&value).to_value(), value);
        }
    }
}
