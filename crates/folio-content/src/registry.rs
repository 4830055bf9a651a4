//! The site's collection registry.
//!
//! [`collections`] declares `blog` and `projects`; the resulting
//! [`Collections`] map is what page rendering consumes.

use std::{collections::BTreeMap, path::Path};

use folio_core::{ContentConfig, FieldKind, Result, Schema};

use crate::{
    collection::{CheckReport, Collection, CollectionDefinition, define_collection},
    entries::{BlogPost, ProjectEntry},
    loader::GlobLoader,
};

pub const BLOG: &str = "blog";
pub const PROJECTS: &str = "projects";

/// Metadata schema of blog posts.
pub fn blog_schema() -> Schema {
    Schema::new()
        .required("title", FieldKind::Text)
        .required("description", FieldKind::Text)
        .required("pubDate", FieldKind::Date)
        .optional("updatedDate", FieldKind::Date)
        .optional("heroImage", FieldKind::Text)
}

/// Metadata schema of project entries.
pub fn projects_schema() -> Schema {
    Schema::new()
        .required("title", FieldKind::Text)
        .required("description", FieldKind::Text)
        .optional("tagline", FieldKind::Text)
        .required("period", FieldKind::Text)
        .optional("location", FieldKind::Text)
        .required("tags", FieldKind::TextList)
        .optional("heroImage", FieldKind::Text)
        .optional("live", FieldKind::Url)
        .optional("github", FieldKind::Url)
}

/// Declare the site's collections.
pub fn collections(config: &ContentConfig) -> Result<Collections> {
    let mut registry = Collections::default();
    registry.insert(
        BLOG,
        define_collection(
            GlobLoader::new(&config.blog_dir, &config.pattern)?,
            blog_schema(),
        ),
    );
    registry.insert(
        PROJECTS,
        define_collection(
            GlobLoader::new(&config.projects_dir, &config.pattern)?,
            projects_schema(),
        ),
    );
    Ok(registry)
}

/// Collection definitions keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Collections(BTreeMap<String, CollectionDefinition>);

impl Collections {
    pub fn insert(&mut self, name: impl Into<String>, definition: CollectionDefinition) {
        self.0.insert(name.into(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&CollectionDefinition> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionDefinition)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Load every collection. The first invalid document aborts the load.
    pub fn load(&self, root: &Path) -> Result<Catalog> {
        let mut catalog = Catalog::default();
        for (name, definition) in &self.0 {
            let collection = definition.load(name, root)?;
            catalog.0.insert(name.clone(), collection);
        }
        Ok(catalog)
    }

    /// Validate every collection, collecting all failures.
    pub fn check(&self, root: &Path) -> Result<Vec<(String, CheckReport)>> {
        self.0
            .iter()
            .map(|(name, definition)| Ok((name.clone(), definition.check(root)?)))
            .collect()
    }
}

/// Loaded collections keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog(BTreeMap<String, Collection>);

impl Catalog {
    pub fn get(&self, name: &str) -> Option<&Collection> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Collection)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Blog posts, newest first. Posts published on the same instant are
    /// ordered by title.
    pub fn blog_posts(&self) -> Result<Vec<BlogPost>> {
        let mut posts = self
            .get(BLOG)
            .map(|c| c.iter().map(BlogPost::from_entry).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default();

        posts.sort_by(|a, b| {
            b.pub_date
                .cmp(&a.pub_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        Ok(posts)
    }

    /// Projects in id order.
    pub fn projects(&self) -> Result<Vec<ProjectEntry>> {
        Ok(self
            .get(PROJECTS)
            .map(|c| c.iter().map(ProjectEntry::from_entry).collect::<Result<Vec<_>>>())
            .transpose()?
            .unwrap_or_default())
    }
}
