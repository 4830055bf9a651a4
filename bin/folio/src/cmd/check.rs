//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use folio_content::collections;
use folio_core::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Documents examined per collection.
    pub checked: Vec<(String, usize)>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every document of every collection.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    for (name, count) in &result.checked {
        println!("  {name}: {count} document(s) checked");
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate configuration and content without printing anything.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    let config = match Config::load(config_path) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    check_site_values(&config, &mut result);

    let registry = match collections(&config.content) {
        Ok(r) => r,
        Err(e) => {
            result.add_error(e.to_string());
            return result;
        }
    };

    for (name, definition) in registry.iter() {
        let dir = config.resolve(definition.loader().base());
        if !dir.is_dir() {
            result.add_warning(format!(
                "Collection `{name}` directory missing: {}",
                definition.loader().base().display()
            ));
        }

        match definition.check(config.root()) {
            Ok(report) => {
                if report.checked == 0 && dir.is_dir() {
                    result.add_warning(format!("Collection `{name}` has no documents"));
                }
                result.checked.push((name.to_string(), report.checked));
                for err in report.errors {
                    result.add_error(err.to_string());
                }
                for warning in report.warnings {
                    result.add_warning(format!("Collection `{name}`: {warning}"));
                }
            }
            Err(e) => result.add_error(format!("Collection `{name}`: {e}")),
        }
    }

    result
}

/// Check site constants for common issues.
fn check_site_values(config: &Config, result: &mut ValidationResult) {
    let site = &config.site;

    if site.description.as_deref().is_none_or(str::is_empty) {
        result.add_warning("site.description is empty");
    }

    for (key, url) in [
        ("site.github_url", &site.github_url),
        ("site.linkedin_url", &site.linkedin_url),
    ] {
        if let Some(url) = url
            && !url.starts_with("http")
        {
            result.add_warning(format!("{key} should start with http:// or https://"));
        }
    }

    if let Some(style_base) = &config.style.base
        && !config.resolve(style_base).exists()
    {
        result.add_warning(format!(
            "style.base does not exist: {}",
            style_base.display()
        ));
    }
}
