//! Entry identifiers derived from source paths.

use std::path::{Component, Path};

/// Derive an entry id from a base-relative source path.
///
/// - `hello-world.md` → `hello-world`
/// - `2024/My Trip.mdx` → `2024/my-trip`
/// - `guides/setup/index.md` → `guides/setup`
pub fn entry_id(relative: &Path) -> String {
    let mut segments: Vec<String> = relative
        .parent()
        .unwrap_or(Path::new(""))
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(slugify(&part.to_string_lossy())),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();

    let stem = relative
        .file_stem()
        .map(|s| slugify(&s.to_string_lossy()))
        .unwrap_or_default();

    // `dir/index.md` names the directory itself.
    if stem != "index" || segments.is_empty() {
        segments.push(stem);
    }

    segments.join("/")
}

/// Lower-case a path segment, turning whitespace into `-` and dropping
/// punctuation other than `-` and `_`.
pub fn slugify(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}
