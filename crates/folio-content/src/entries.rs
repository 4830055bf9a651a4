//! Typed views over the `blog` and `projects` collections.

use chrono::{DateTime, Utc};
use folio_core::Result;
use serde::{Deserialize, Serialize};

use crate::collection::Entry;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
}

impl BlogPost {
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        let mut post: Self = entry.parse_as()?;
        post.id = entry.id.clone();
        Ok(post)
    }

    /// Most recent of the publication and update dates.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.updated_date.map_or(self.pub_date, |u| u.max(self.pub_date))
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Free text such as `2022–2023`; never parsed as a date.
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl ProjectEntry {
    pub fn from_entry(entry: &Entry) -> Result<Self> {
        let mut project: Self = entry.parse_as()?;
        project.id = entry.id.clone();
        Ok(project)
    }
}
