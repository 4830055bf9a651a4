//! Collection definitions and loading.
//!
//! A [`CollectionDefinition`] pairs a [`GlobLoader`] with a [`Schema`].
//! Nothing is read until [`CollectionDefinition::load`] runs; at that point
//! every matched file is parsed and validated, and the first invalid
//! document fails the load.

use std::{
    collections::{BTreeMap, btree_map},
    fs,
    path::{Path, PathBuf},
};

use folio_core::{CoreError, Result, Schema, ValidatedData, frontmatter};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    id::entry_id,
    loader::{GlobLoader, SourceFile},
};

/// Metadata key that overrides the path-derived entry id.
const SLUG_KEY: &str = "slug";

/// Where a collection's documents live and what their metadata must look like.
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    loader: GlobLoader,
    schema: Schema,
}

/// Declare a collection. No I/O happens here.
pub fn define_collection(loader: GlobLoader, schema: Schema) -> CollectionDefinition {
    CollectionDefinition { loader, schema }
}

/// A validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub collection: String,
    /// Source path relative to the site root.
    pub file_path: PathBuf,
    pub data: ValidatedData,
    pub body: String,
}

impl Entry {
    /// Deserialize the validated metadata into a typed record.
    pub fn parse_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(self.data.deserialize_into()?)
    }
}

/// The loaded entries of one collection, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    name: String,
    entries: BTreeMap<String, Entry>,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> btree_map::Values<'_, String, Entry> {
        self.entries.values()
    }

    /// Map each label of a list field to the ids of the entries carrying it.
    pub fn label_index(&self, field: &str) -> BTreeMap<String, Vec<String>> {
        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in self.entries.values() {
            for label in entry.data.text_list(field).unwrap_or_default() {
                let ids = index.entry(label.clone()).or_default();
                if !ids.contains(&entry.id) {
                    ids.push(entry.id.clone());
                }
            }
        }
        index
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Entry;
    type IntoIter = btree_map::Values<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of validating every document of a collection.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of files examined.
    pub checked: usize,
    /// One error per invalid document.
    pub errors: Vec<CoreError>,
    /// Problems that do not stop a load, such as colliding entry ids.
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CollectionDefinition {
    pub fn loader(&self) -> &GlobLoader {
        &self.loader
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Load and validate every matching document under `root`.
    pub fn load(&self, name: &str, root: &Path) -> Result<Collection> {
        info!(
            collection = name,
            dir = %self.loader.base().display(),
            pattern = self.loader.pattern(),
            "loading collection"
        );

        let mut collection = Collection {
            name: name.to_string(),
            entries: BTreeMap::new(),
        };

        for file in self.loader.scan(root)? {
            let entry = self.load_file(name, &file)?;
            if let Some(previous) = collection.entries.insert(entry.id.clone(), entry) {
                warn!(
                    collection = name,
                    id = %previous.id,
                    replaced = %previous.file_path.display(),
                    "duplicate entry id, later file wins"
                );
            }
        }

        info!(collection = name, entries = collection.len(), "collection loaded");
        Ok(collection)
    }

    /// Validate every matching document, collecting all failures.
    pub fn check(&self, root: &Path) -> Result<CheckReport> {
        let mut report = CheckReport::default();
        let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
        for file in self.loader.scan(root)? {
            report.checked += 1;
            match self.load_file("", &file) {
                Ok(entry) => {
                    if let Some(previous) = seen.insert(entry.id.clone(), entry.file_path) {
                        report.warnings.push(format!(
                            "duplicate entry id `{}`: {} replaces {}",
                            entry.id,
                            file.display.display(),
                            previous.display()
                        ));
                    }
                }
                Err(e) => report.errors.push(e),
            }
        }
        Ok(report)
    }

    fn load_file(&self, name: &str, file: &SourceFile) -> Result<Entry> {
        debug!(path = %file.display.display(), "loading entry");

        let content = fs::read_to_string(&file.path)?;
        let (metadata, body) = frontmatter::parse_frontmatter(&content, &file.display)?;

        let data = self
            .schema
            .validate(&metadata)
            .map_err(|issues| CoreError::schema(&file.display, issues))?;

        let id = match metadata.get(SLUG_KEY) {
            Some(Value::String(slug)) if !slug.trim().is_empty() => {
                slug.trim().trim_matches('/').to_string()
            }
            _ => entry_id(&file.relative),
        };

        Ok(Entry {
            id,
            collection: name.to_string(),
            file_path: file.display.clone(),
            data,
            body: body.to_string(),
        })
    }
}
