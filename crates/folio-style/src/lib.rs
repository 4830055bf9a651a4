//! Folio Style Library
//!
//! Builds the configuration consumed by the utility-class CSS generator:
//! the shared design-token configuration, with the site's dark-mode rule and
//! content globs laid over it.

pub mod base;
pub mod dark_mode;
pub mod merge;

pub use base::read_base;
pub use dark_mode::DarkMode;
pub use merge::{
    CONTENT_GLOBS, DARK_MODE_SELECTOR, StyleConfig, build_style_config, site_dark_mode,
};
