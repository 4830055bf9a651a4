//! Style command - merge the base token configuration with the site overrides

use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use folio_core::Config;
use folio_style::{build_style_config, read_base};

/// Run the style command.
///
/// `base` and `output` override `style.base` and `style.output` from the
/// configuration. Without any output path the result goes to stdout.
pub fn run(config_path: &Path, base: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let config = if config_path.exists() {
        Some(Config::load(config_path)?)
    } else {
        None
    };

    let base_path = base
        .map(Path::to_path_buf)
        .or_else(|| configured(config.as_ref(), |c| c.style.base.as_deref()))
        .ok_or_else(|| eyre!("No base style config given; pass --base or set style.base"))?;

    let output_path = output
        .map(Path::to_path_buf)
        .or_else(|| configured(config.as_ref(), |c| c.style.output.as_deref()));

    tracing::info!(base = %base_path.display(), "Building style configuration");
    let rendered = render(&base_path)?;

    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).wrap_err("Failed to create output directory")?;
            }
            fs::write(&path, format!("{rendered}\n")).wrap_err("Failed to write style config")?;
            println!("Wrote: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

/// Merge the base configuration at `base_path` and render it as JSON.
pub fn render(base_path: &Path) -> Result<String> {
    let base = read_base(base_path)?;
    Ok(build_style_config(&base).to_json_pretty()?)
}

fn configured(config: Option<&Config>, pick: impl Fn(&Config) -> Option<&Path>) -> Option<PathBuf> {
    let config = config?;
    pick(config).map(|p| config.resolve(p))
}

#[cfg(test)]
mod tests {
    use folio_style::{CONTENT_GLOBS, StyleConfig};

    use super::*;

    #[test]
    fn test_render() {
        let dir = tempfile::tempdir().expect("tempdir");
        let base = dir.path().join("brand.json");
        fs::write(&base, r##"{"darkMode":"media","colors":{"brand":"#123456"}}"##)
            .expect("write");

        let rendered = render(&base).expect("render");
        let config: StyleConfig = serde_json::from_str(&rendered).expect("json");
        assert_eq!(config.content(), CONTENT_GLOBS.to_vec());
        assert!(config.get("colors").is_some());
    }

    #[test]
    fn test_run_uses_configured_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("folio.toml"),
            "[site]\ntitle = \"Site\"\n\n[style]\nbase = \"brand.yaml\"\noutput = \"build/tailwind.json\"\n",
        )
        .expect("write config");
        fs::write(dir.path().join("brand.yaml"), "darkMode: class\n").expect("write base");

        run(&dir.path().join("folio.toml"), None, None).expect("run");

        let written = fs::read_to_string(dir.path().join("build/tailwind.json")).expect("read");
        assert!(written.contains("\"selector\""));
    }

    #[test]
    fn test_run_without_base_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = run(&dir.path().join("missing.toml"), None, None).unwrap_err();
        assert!(err.to_string().contains("--base"));
    }
}
