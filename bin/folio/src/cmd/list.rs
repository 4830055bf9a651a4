//! List command - print the loaded entries of each collection

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_content::{BLOG, Catalog, PROJECTS, collections};
use folio_core::Config;

/// Run the list command.
pub fn run(config_path: &Path, collection: Option<&str>) -> Result<()> {
    let config = Config::load(config_path)?;
    let registry = collections(&config.content)?;

    if let Some(name) = collection
        && registry.get(name).is_none()
    {
        bail!("Unknown collection `{name}`");
    }

    let catalog = registry.load(config.root())?;
    for line in lines(&catalog, collection)? {
        println!("{line}");
    }

    Ok(())
}

/// One line per entry, grouped by collection.
pub fn lines(catalog: &Catalog, only: Option<&str>) -> Result<Vec<String>> {
    let mut out = Vec::new();

    for (name, collection) in catalog.iter() {
        if only.is_some_and(|o| o != name) {
            continue;
        }

        out.push(format!("{name} ({})", collection.len()));
        match name {
            BLOG => {
                for post in catalog.blog_posts()? {
                    out.push(format!(
                        "  {}  {}  {}",
                        post.pub_date.format("%Y-%m-%d"),
                        post.id,
                        post.title
                    ));
                }
            }
            PROJECTS => {
                for project in catalog.projects()? {
                    out.push(format!(
                        "  {}  {}  {} [{}]",
                        project.period,
                        project.id,
                        project.title,
                        project.tags.join(", ")
                    ));
                }
            }
            _ => {
                for entry in collection {
                    out.push(format!("  {}", entry.id));
                }
            }
        }
    }

    Ok(out)
}
