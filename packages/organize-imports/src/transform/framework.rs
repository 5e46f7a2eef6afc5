//! Framework-specific spelling of module specifiers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::options::FrameworkResolutionMode;

static NEXTJS_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(?:[cm]?[jt]s|[jt]sx)$").unwrap());

/// Spell `specifier` the way `mode` expects it.
pub fn normalize_specifier(mode: FrameworkResolutionMode, specifier: &str) -> String {
    match mode {
        FrameworkResolutionMode::NextJs => {
            let stripped = NEXTJS_EXTENSION.replace(specifier, "");
            strip_index_segment(&stripped).to_string()
        }
    }
}

fn strip_index_segment(specifier: &str) -> &str {
    match specifier.strip_suffix("/index") {
        Some("") => "/",
        Some(directory) => directory,
        None => specifier,
    }
}
