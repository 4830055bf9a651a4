//! Folio Content Library
//!
//! Content collections for the site: where documents live, what their
//! metadata must look like, and how they are loaded and validated.
//!
//! # Modules
//!
//! - [`loader`] - Directory-glob file discovery
//! - [`collection`] - Collection definitions, entries and loading
//! - [`registry`] - The `blog` and `projects` collections
//! - [`entries`] - Typed blog post and project records
//! - [`id`] - Entry ids derived from source paths

pub mod collection;
pub mod entries;
pub mod id;
pub mod loader;
pub mod registry;

pub use collection::{CheckReport, Collection, CollectionDefinition, Entry, define_collection};
pub use entries::{BlogPost, ProjectEntry};
pub use loader::{GlobLoader, SourceFile};
pub use registry::{BLOG, Catalog, Collections, PROJECTS, blog_schema, collections, projects_schema};
