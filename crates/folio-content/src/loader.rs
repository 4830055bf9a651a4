//! Directory-glob content loader.
//!
//! Walks a collection's base directory and yields the files whose
//! base-relative path matches the collection pattern.

use std::path::{Path, PathBuf};

use folio_core::{CoreError, Result};
use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Base directory plus file pattern of a collection.
#[derive(Debug, Clone)]
pub struct GlobLoader {
    base: PathBuf,
    pattern: String,
    matcher: GlobMatcher,
}

/// A file selected by a [`GlobLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path to read from.
    pub path: PathBuf,
    /// Path relative to the loader's base directory.
    pub relative: PathBuf,
    /// Path relative to the site root, used in diagnostics.
    pub display: PathBuf,
}

impl GlobLoader {
    /// Create a loader. Fails only when `pattern` is not a valid glob.
    ///
    /// `*` never crosses a path separator; use `**` for recursion.
    pub fn new(base: impl Into<PathBuf>, pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = GlobBuilder::new(&pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| CoreError::glob(&pattern, e.kind().to_string()))?
            .compile_matcher();

        Ok(Self {
            base: base.into(),
            pattern,
            matcher,
        })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether a base-relative path is selected by the pattern.
    pub fn is_match(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative)
    }

    /// List matching files under `root/base`, sorted by path.
    ///
    /// Hidden files and directories are skipped. A missing base directory
    /// yields no files.
    pub fn scan(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let dir = root.join(&self.base);
        if !dir.is_dir() {
            warn!(dir = %dir.display(), "collection directory does not exist");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            if !self.is_match(relative) {
                debug!(path = %relative.display(), "skipping non-matching file");
                continue;
            }

            files.push(SourceFile {
                path: entry.path().to_path_buf(),
                relative: relative.to_path_buf(),
                display: self.base.join(relative),
            });
        }

        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
