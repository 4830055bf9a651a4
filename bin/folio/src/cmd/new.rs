//! New command - create a content document with boilerplate frontmatter

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Datelike, Utc};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use folio_content::collections;
use folio_core::{Config, ContentConfig, FieldKind, Schema};

/// Run the new command.
///
/// Creates `<collection dir>/<path>` (with `.md` appended when `path` has no
/// extension) containing every required field of the collection schema.
pub fn run(config_path: &Path, collection: &str, path: &Path) -> Result<PathBuf> {
    tracing::info!(collection, ?path, "Creating new content");

    let (root, content) = if config_path.exists() {
        let config = Config::load(config_path)?;
        (config.root().to_path_buf(), config.content.clone())
    } else {
        (PathBuf::from("."), ContentConfig::default())
    };

    let registry = collections(&content)?;
    let definition = registry.get(collection).ok_or_else(|| {
        let known: Vec<_> = registry.names().collect();
        eyre!(
            "Unknown collection `{collection}` (expected one of: {})",
            known.join(", ")
        )
    })?;

    let mut file_path = root.join(definition.loader().base()).join(path);
    if file_path.extension().is_none() {
        file_path.set_extension("md");
    }

    if file_path.exists() {
        bail!("Refusing to overwrite {}", file_path.display());
    }

    let relative = file_path
        .strip_prefix(root.join(definition.loader().base()))
        .unwrap_or(&file_path);
    if !definition.loader().is_match(relative) {
        tracing::warn!(
            path = %relative.display(),
            pattern = definition.loader().pattern(),
            "new file does not match the collection pattern and will not be loaded"
        );
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    let text = scaffold(definition.schema(), path)?;
    fs::write(&file_path, text).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

/// Frontmatter with a placeholder for every required field.
fn scaffold(schema: &Schema, path: &Path) -> Result<String> {
    let title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .replace(['-', '_'], " ");

    let today = Utc::now();
    let mut out = String::from("---\n");

    for field in schema.fields().iter().filter(|f| f.required) {
        let value = match (field.kind, field.name.as_str()) {
            (_, "title") => yaml_scalar(&title)?,
            (_, "period") => format!("\"{}\"", today.year()),
            (FieldKind::Date, _) => today.format("%Y-%m-%d").to_string(),
            (FieldKind::TextList, _) => "[]".to_string(),
            (FieldKind::Text | FieldKind::Url, _) => "\"\"".to_string(),
        };
        out.push_str(&format!("{}: {value}\n", field.name));
    }

    out.push_str("---\n\nWrite your content here.\n");
    Ok(out)
}

/// Render a string as a single-line YAML scalar, quoted only when needed.
fn yaml_scalar(value: &str) -> Result<String> {
    let rendered = serde_yaml::to_string(value).wrap_err("Failed to render title")?;
    Ok(rendered.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use folio_content::{BLOG, PROJECTS, blog_schema, projects_schema};
    use folio_core::frontmatter::parse_frontmatter;

    use super::*;

    #[test]
    fn test_blog_scaffold_passes_schema() {
        let text = scaffold(&blog_schema(), Path::new("my-first-post")).expect("scaffold");
        let (meta, body) = parse_frontmatter(&text, Path::new("x.md")).expect("parse");

        assert_eq!(meta["title"], "my first post");
        assert_eq!(body, "Write your content here.\n");
        assert!(!meta.contains_key("heroImage"));
        assert!(blog_schema().validate(&meta).is_ok());
    }

    #[test]
    fn test_project_scaffold_passes_schema() {
        let text = scaffold(&projects_schema(), Path::new("falak")).expect("scaffold");
        let (meta, _) = parse_frontmatter(&text, Path::new("x.md")).expect("parse");

        assert_eq!(meta["tags"], serde_json::json!([]));
        assert!(meta["period"].is_string());
        assert!(projects_schema().validate(&meta).is_ok());
    }

    #[test]
    fn test_scaffold_title_survives_yaml_special_characters() {
        for stem in ["a\u{200b}b", "yes", "2024", "note: part 1", "it's #1", "\"quoted\""] {
            let text = scaffold(&blog_schema(), Path::new(stem)).expect("scaffold");
            let (meta, _) = parse_frontmatter(&text, Path::new("x.md")).expect(stem);
            assert_eq!(meta["title"], stem, "{text}");
            assert!(blog_schema().validate(&meta).is_ok(), "{text}");
        }
    }

    #[test]
    fn test_run_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("folio.toml");
        fs::write(&config, "[site]\ntitle = \"Site\"\n").expect("write config");

        let created = run(&config, BLOG, Path::new("2024/hello-world")).expect("create");
        assert_eq!(
            created,
            dir.path().join("src/content/blog/2024/hello-world.md")
        );
        assert!(created.exists());

        let err = run(&config, BLOG, Path::new("2024/hello-world")).unwrap_err();
        assert!(err.to_string().contains("Refusing to overwrite"));

        let created = run(&config, PROJECTS, Path::new("site.mdx")).expect("create");
        assert_eq!(created, dir.path().join("src/content/projects/site.mdx"));
    }

    #[test]
    fn test_unknown_collection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("folio.toml");
        fs::write(&config, "[site]\ntitle = \"Site\"\n").expect("write config");

        let err = run(&config, "notes", Path::new("x")).unwrap_err();
        assert!(err.to_string().contains("blog, projects"));
    }
}
