//! Front-matter splitting and parsing for content files.
//!
//! A document may open with a YAML block fenced by `---` or a TOML block
//! fenced by `+++`. The fences must sit on their own lines. The block is
//! parsed into an untyped [`Metadata`] map; typing happens later against a
//! collection [`Schema`](crate::schema::Schema).

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// Raw, unvalidated metadata of a single document.
pub type Metadata = Map<String, Value>;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// Returns `Ok(None)` when the document has no frontmatter at all, and an
/// error when an opening fence is never closed.
pub fn split_frontmatter<'a>(
    content: &'a str,
    path: &Path,
) -> Result<Option<(FrontmatterFormat, &'a str, &'a str)>> {
    let content = strip_bom(content);
    let content = content.trim_start_matches(['\n', '\r']);

    let first_line = content.lines().next().unwrap_or("");
    let format = match first_line.trim_end() {
        "---" => FrontmatterFormat::Yaml,
        "+++" => FrontmatterFormat::Toml,
        _ => return Ok(None),
    };
    let delimiter = format.delimiter();

    let after_open = content[first_line.len()..]
        .strip_prefix("\r\n")
        .or_else(|| content[first_line.len()..].strip_prefix('\n'))
        .unwrap_or("");

    // Walk line by line so a fence inside a value never closes the block.
    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok(Some((format, frontmatter, body.trim_start_matches(['\n', '\r']))));
        }
        offset += line.len();
    }

    Err(CoreError::frontmatter(
        path,
        format!("frontmatter block opened with `{delimiter}` is never closed"),
    ))
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Parse the frontmatter of a document into raw metadata and body.
///
/// Documents without frontmatter yield empty metadata and the full content
/// as body.
pub fn parse_frontmatter<'a>(content: &'a str, path: &Path) -> Result<(Metadata, &'a str)> {
    let Some((format, fm_str, body)) = split_frontmatter(content, path)? else {
        return Ok((Metadata::new(), strip_bom(content)));
    };

    let metadata = match format {
        FrontmatterFormat::Yaml => parse_yaml(fm_str, path)?,
        FrontmatterFormat::Toml => parse_toml(fm_str, path)?,
    };

    Ok((metadata, body))
}

fn parse_yaml(source: &str, path: &Path) -> Result<Metadata> {
    if source.trim().is_empty() {
        return Ok(Metadata::new());
    }

    let value: Value =
        serde_yaml::from_str(source).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Metadata::new()),
        other => Err(CoreError::frontmatter(
            path,
            format!("frontmatter must be a mapping, found {}", type_name(&other)),
        )),
    }
}

fn parse_toml(source: &str, path: &Path) -> Result<Metadata> {
    let table: toml::Table =
        toml::from_str(source).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// Convert a TOML value into its JSON counterpart.
///
/// TOML datetimes become their string rendering so date coercion sees the
/// same shape as YAML input.
pub fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Human readable name of a JSON value's type, used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}
