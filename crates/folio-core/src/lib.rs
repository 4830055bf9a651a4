//! Folio Core Library
//!
//! Core types, configuration, front-matter handling and the declarative
//! metadata schemas shared by the folio crates.

pub mod config;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod schema;

pub use config::{Config, ContentConfig, SiteConfig, StyleSettings};
pub use error::{CoreError, Result};
pub use frontmatter::{FrontmatterFormat, Metadata};
pub use schema::{
    FieldKind, FieldSpec, FieldValue, IssueKind, Schema, SchemaIssue, UnknownKeys, ValidatedData,
};
