//! Site configuration management.
//!
//! `folio.toml` holds the site's global constants, the content directory
//! layout and the style pipeline inputs. Relative paths are resolved against
//! the directory containing the configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide constants.
    pub site: SiteConfig,

    /// Content collection layout.
    #[serde(default)]
    pub content: ContentConfig,

    /// Style pipeline inputs.
    #[serde(default)]
    pub style: StyleSettings,

    /// Directory the configuration was loaded from.
    #[serde(skip)]
    root: PathBuf,
}

/// Site-wide constants shared by every page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub github_url: Option<String>,

    #[serde(default)]
    pub linkedin_url: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub resume_url: Option<String>,
}

/// Where the content collections live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Base directory of the `blog` collection.
    #[serde(default = "default_blog_dir")]
    pub blog_dir: PathBuf,

    /// Base directory of the `projects` collection.
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// File pattern applied inside each base directory.
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

/// Inputs of the style configuration merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSettings {
    /// Base design-token configuration file.
    #[serde(default)]
    pub base: Option<PathBuf>,

    /// Where the merged configuration is written.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_blog_dir() -> PathBuf {
    PathBuf::from("src/content/blog")
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("src/content/projects")
}

fn default_pattern() -> String {
    "**/*.{md,mdx}".to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            blog_dir: default_blog_dir(),
            projects_dir: default_projects_dir(),
            pattern: default_pattern(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.root = root_of(path);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let mut config: Config = settings.try_deserialize()?;
        config.root = root_of(path);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.content.pattern.trim().is_empty() {
            return Err(CoreError::config("content.pattern cannot be empty"));
        }

        if let Some(email) = &self.site.email
            && !email.contains('@')
        {
            tracing::warn!(email = %email, "site.email does not look like an e-mail address");
        }

        Ok(())
    }

    /// Site root: the directory holding the configuration file.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path from the configuration against the site root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

fn root_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
