//! Declarative metadata schemas.
//!
//! A [`Schema`] is an ordered list of [`FieldSpec`]s. [`Schema::validate`]
//! is the one routine that turns raw front matter into [`ValidatedData`],
//! coercing dates and collecting every [`SchemaIssue`] it finds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::{
    date,
    frontmatter::{Metadata, type_name},
};

/// Semantic type of a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text.
    Text,
    /// Calendar date/time, coerced to UTC.
    Date,
    /// Link target: an absolute URL or a site-relative path.
    Url,
    /// Ordered sequence of text labels.
    TextList,
}

impl FieldKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Date => "date",
            Self::Url => "url",
            Self::TextList => "array",
        }
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// What to do with metadata keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownKeys {
    /// Drop them from the validated data.
    #[default]
    Strip,
    /// Keep them, untouched, next to the declared fields.
    Passthrough,
    /// Report each one as a schema issue.
    Strict,
}

/// Reason a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("required")]
    Required,

    #[error("expected {expected}, received {received}")]
    InvalidType {
        expected: &'static str,
        received: &'static str,
    },

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("unrecognized key")]
    UnknownKey,
}

/// A validation failure for one field of a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct SchemaIssue {
    /// Field path, e.g. `title` or `tags[2]`.
    pub field: String,
    pub kind: IssueKind,
}

impl SchemaIssue {
    pub fn new(field: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

/// A coerced field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(DateTime<Utc>),
    TextList(Vec<String>),
    /// An undeclared key kept under [`UnknownKeys::Passthrough`].
    Raw(Value),
}

/// Metadata that passed a schema, keyed by field name.
///
/// Absent optional fields are simply not present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedData(BTreeMap<String, FieldValue>);

impl ValidatedData {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        match self.0.get(name) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn text_list(&self, name: &str) -> Option<&[String]> {
        match self.0.get(name) {
            Some(FieldValue::TextList(items)) => Some(items),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as a JSON object. Dates become RFC 3339 strings.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Deserialize into a typed record.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

/// Declarative description of a collection's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    unknown_keys: UnknownKeys,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier declaration of the same name.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    #[must_use]
    pub fn required(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSpec::required(name, kind))
    }

    #[must_use]
    pub fn optional(self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.field(FieldSpec::optional(name, kind))
    }

    #[must_use]
    pub fn unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn unknown_key_policy(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// Validate raw metadata against this schema.
    ///
    /// Every issue is collected; the error is never empty.
    pub fn validate(&self, raw: &Metadata) -> Result<ValidatedData, Vec<SchemaIssue>> {
        let mut data = BTreeMap::new();
        let mut issues = Vec::new();

        for spec in &self.fields {
            match raw.get(&spec.name) {
                None if spec.required => {
                    issues.push(SchemaIssue::new(&spec.name, IssueKind::Required));
                }
                None => {}
                Some(value) => match coerce(spec, value) {
                    Ok(coerced) => {
                        data.insert(spec.name.clone(), coerced);
                    }
                    Err(mut errs) => issues.append(&mut errs),
                },
            }
        }

        for (key, value) in raw {
            if self.get(key).is_some() {
                continue;
            }
            match self.unknown_keys {
                UnknownKeys::Strip => tracing::debug!(key = %key, "dropping undeclared key"),
                UnknownKeys::Passthrough => {
                    data.insert(key.clone(), FieldValue::Raw(value.clone()));
                }
                UnknownKeys::Strict => issues.push(SchemaIssue::new(key, IssueKind::UnknownKey)),
            }
        }

        if issues.is_empty() {
            Ok(ValidatedData(data))
        } else {
            Err(issues)
        }
    }
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<FieldValue, Vec<SchemaIssue>> {
    let mismatch = |field: &str| {
        SchemaIssue::new(
            field,
            IssueKind::InvalidType {
                expected: spec.kind.name(),
                received: type_name(value),
            },
        )
    };

    match (spec.kind, value) {
        (FieldKind::Text | FieldKind::Url, Value::String(s)) => Ok(FieldValue::Text(s.clone())),
        (FieldKind::Date, Value::String(s)) => date::parse_date(s)
            .map(FieldValue::Date)
            .ok_or_else(|| vec![SchemaIssue::new(&spec.name, IssueKind::InvalidDate(s.clone()))]),
        (FieldKind::Date, Value::Number(n)) => n
            .as_i64()
            .and_then(date::from_epoch_millis)
            .map(FieldValue::Date)
            .ok_or_else(|| {
                vec![SchemaIssue::new(
                    &spec.name,
                    IssueKind::InvalidDate(n.to_string()),
                )]
            }),
        (FieldKind::TextList, Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    other => issues.push(SchemaIssue::new(
                        format!("{}[{i}]", spec.name),
                        IssueKind::InvalidType {
                            expected: "string",
                            received: type_name(other),
                        },
                    )),
                }
            }
            if issues.is_empty() {
                Ok(FieldValue::TextList(out))
            } else {
                Err(issues)
            }
        }
        _ => Err(vec![mismatch(&spec.name)]),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    fn meta(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => panic!("test metadata must be an object"),
        }
    }

    fn post_schema() -> Schema {
        Schema::new()
            .required("title", FieldKind::Text)
            .required("description", FieldKind::Text)
            .required("pubDate", FieldKind::Date)
            .optional("updatedDate", FieldKind::Date)
            .optional("heroImage", FieldKind::Text)
    }

    #[test]
    fn test_valid_document() {
        let data = post_schema()
            .validate(&meta(json!({
                "title": "Hello",
                "description": "First post",
                "pubDate": "2024-01-05",
            })))
            .expect("valid");

        assert_eq!(data.text("title"), Some("Hello"));
        assert_eq!(
            data.date("pubDate"),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).single()
        );
        assert!(!data.contains_key("updatedDate"));
        assert!(!data.contains_key("heroImage"));
        assert_eq!(data.len(), 3);
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let issues = post_schema()
            .validate(&meta(json!({ "description": "no title" })))
            .unwrap_err();

        assert_eq!(
            issues,
            vec![
                SchemaIssue::new("title", IssueKind::Required),
                SchemaIssue::new("pubDate", IssueKind::Required),
            ]
        );
    }

    #[test]
    fn test_type_mismatch() {
        let schema = Schema::new().required("period", FieldKind::Text);
        let issues = schema.validate(&meta(json!({ "period": 2023 }))).unwrap_err();
        assert_eq!(issues[0].to_string(), "period: expected string, received number");

        let issues = schema.validate(&meta(json!({ "period": null }))).unwrap_err();
        assert_eq!(issues[0].to_string(), "period: expected string, received null");
    }

    #[test]
    fn test_unparsable_date() {
        let issues = post_schema()
            .validate(&meta(json!({
                "title": "T",
                "description": "D",
                "pubDate": "someday",
            })))
            .unwrap_err();
        assert_eq!(
            issues,
            vec![SchemaIssue::new(
                "pubDate",
                IssueKind::InvalidDate("someday".into())
            )]
        );
    }

    #[test]
    fn test_null_optional_date_is_rejected() {
        let issues = post_schema()
            .validate(&meta(json!({
                "title": "T",
                "description": "D",
                "pubDate": "2024-01-05",
                "updatedDate": null,
                "heroImage": null,
            })))
            .unwrap_err();
        assert_eq!(
            issues,
            vec![
                SchemaIssue::new(
                    "updatedDate",
                    IssueKind::InvalidType {
                        expected: "date",
                        received: "null",
                    }
                ),
                SchemaIssue::new(
                    "heroImage",
                    IssueKind::InvalidType {
                        expected: "string",
                        received: "null",
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_epoch_millis_date() {
        let data = Schema::new()
            .required("pubDate", FieldKind::Date)
            .validate(&meta(json!({ "pubDate": 0 })))
            .expect("valid");
        assert_eq!(data.date("pubDate"), DateTime::from_timestamp(0, 0));
    }

    #[test]
    fn test_text_list() {
        let schema = Schema::new().required("tags", FieldKind::TextList);

        let data = schema.validate(&meta(json!({ "tags": [] }))).expect("valid");
        assert_eq!(data.text_list("tags"), Some(&[][..]));

        let data = schema
            .validate(&meta(json!({ "tags": ["b", "a", "b"] })))
            .expect("valid");
        assert_eq!(
            data.text_list("tags"),
            Some(&["b".to_string(), "a".to_string(), "b".to_string()][..])
        );

        let issues = schema
            .validate(&meta(json!({ "tags": ["ok", 3, true] })))
            .unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "tags[1]");
        assert_eq!(issues[1].field, "tags[2]");

        let issues = schema.validate(&meta(json!({ "tags": "rust" }))).unwrap_err();
        assert_eq!(issues[0].to_string(), "tags: expected array, received string");
    }

    #[test]
    fn test_unknown_key_policies() {
        let raw = meta(json!({ "title": "T", "draft": true }));
        let base = Schema::new().required("title", FieldKind::Text);

        let stripped = base.clone().validate(&raw).expect("strip");
        assert!(!stripped.contains_key("draft"));

        let kept = base
            .clone()
            .unknown_keys(UnknownKeys::Passthrough)
            .validate(&raw)
            .expect("passthrough");
        assert_eq!(kept.get("draft"), Some(&FieldValue::Raw(json!(true))));

        let issues = base
            .unknown_keys(UnknownKeys::Strict)
            .validate(&raw)
            .unwrap_err();
        assert_eq!(issues, vec![SchemaIssue::new("draft", IssueKind::UnknownKey)]);
    }

    #[test]
    fn test_redeclaring_a_field_replaces_it() {
        let schema = Schema::new()
            .required("title", FieldKind::Text)
            .optional("title", FieldKind::Text);
        assert_eq!(schema.fields().len(), 1);
        assert!(!schema.fields()[0].required);
    }

    #[test]
    fn test_deserialize_into_typed_record() {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Post {
            title: String,
            pub_date: DateTime<Utc>,
            updated_date: Option<DateTime<Utc>>,
        }

        let data = post_schema()
            .validate(&meta(json!({
                "title": "Hello",
                "description": "D",
                "pubDate": "2024-01-05T00:00:00Z",
            })))
            .expect("valid");

        let post: Post = data.deserialize_into().expect("typed");
        assert_eq!(post.title, "Hello");
        assert_eq!(
            post.pub_date,
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
        assert!(post.updated_date.is_none());

        assert_eq!(data.to_json()["pubDate"], json!("2024-01-05T00:00:00Z"));
    }
}
