//! Error types for the folio core library.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::schema::SchemaIssue;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for folio.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Front-matter block could not be split or parsed.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Metadata did not satisfy the collection schema.
    #[error("Schema violation in {path}: {}", Issues(.issues))]
    Schema {
        path: PathBuf,
        issues: Vec<SchemaIssue>,
    },

    /// Invalid loader glob pattern.
    #[error("Invalid glob pattern `{pattern}`: {message}")]
    Glob { pattern: String, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new schema violation for a document.
    pub fn schema(path: impl Into<PathBuf>, issues: Vec<SchemaIssue>) -> Self {
        Self::Schema {
            path: path.into(),
            issues,
        }
    }

    /// Create a new glob error.
    pub fn glob(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Glob {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

struct Issues<'a>(&'a [SchemaIssue]);

impl fmt::Display for Issues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IssueKind;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_frontmatter_error() {
        let err = CoreError::frontmatter("src/content/blog/post.md", "unclosed block");
        assert!(err.to_string().contains("Frontmatter error"));
        assert!(err.to_string().contains("src/content/blog/post.md"));
        assert!(err.to_string().contains("unclosed block"));
    }

    #[test]
    fn test_schema_error_lists_every_issue() {
        let err = CoreError::schema(
            "blog/first.md",
            vec![
                SchemaIssue::new("title", IssueKind::Required),
                SchemaIssue::new("pubDate", IssueKind::InvalidDate("soon".into())),
            ],
        );
        let msg = err.to_string();
        assert!(msg.starts_with("Schema violation in blog/first.md"));
        assert!(msg.contains("title: required"));
        assert!(msg.contains("pubDate: invalid date `soon`"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }
}
