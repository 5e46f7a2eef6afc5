//! Options accepted by [`crate::organize`].
//!
//! Field names follow the host formatter's camelCase option names so the
//! whole set can be deserialized straight from the host's JSON.

use serde::{Deserialize, Deserializer};
use ts::OrganizeImportsTypeOrder;

/// File name used when the host does not pass one.
pub const DEFAULT_FILEPATH: &str = "file.ts";

/// `parentParser` value meaning the file is a block embedded in a Vue
/// single-file component that was already organized as a whole.
pub const EMBEDDED_VUE_PARSER: &str = "vue";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizeOptions {
    pub filepath: Option<String>,
    pub parser: Option<String>,
    pub parent_parser: Option<String>,
    pub organize_imports_skip_destructive_code_actions: bool,
    pub organize_imports_type_order: OrganizeImportsTypeOrder,
    #[serde(flatten)]
    pub rewrite: RewriteOptions,
}

impl OrganizeOptions {
    pub fn filepath(&self) -> &str {
        self.filepath.as_deref().unwrap_or(DEFAULT_FILEPATH)
    }

    pub fn is_embedded(&self) -> bool {
        self.parent_parser.as_deref() == Some(EMBEDDED_VUE_PARSER)
    }
}

/// Framework-specific spelling of module paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkResolutionMode {
    /// Next.js resolves directories through their `index` file and never
    /// needs script extensions, so both are dropped.
    NextJs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewriteOptions {
    pub absolute_path_prefix: Option<String>,
    pub max_relative_path_depth: Option<usize>,
    pub tsconfig_path: Option<String>,
    /// `Some(None)` means the host set the option but selected no framework
    /// (legacy `nextjsMode: false`), which still turns the rewrite pass on.
    #[serde(alias = "nextjsMode", deserialize_with = "deserialize_framework_mode")]
    pub framework_resolution_mode: Option<Option<FrameworkResolutionMode>>,
    pub project_root: Option<String>,
}

impl RewriteOptions {
    /// The rewrite pass runs only when one of its options was given.
    pub fn is_enabled(&self) -> bool {
        self.absolute_path_prefix.is_some()
            || self.max_relative_path_depth.is_some()
            || self.tsconfig_path.is_some()
            || self.framework_resolution_mode.is_some()
    }

    pub fn framework_mode(&self) -> Option<FrameworkResolutionMode> {
        self.framework_resolution_mode.flatten()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFrameworkMode {
    Enabled(bool),
    Mode(FrameworkResolutionMode),
}

fn deserialize_framework_mode<'de, D>(
    deserializer: D,
) -> Result<Option<Option<FrameworkResolutionMode>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawFrameworkMode>::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawFrameworkMode::Enabled(true) => Some(FrameworkResolutionMode::NextJs),
        RawFrameworkMode::Enabled(false) => None,
        RawFrameworkMode::Mode(mode) => Some(mode),
    }))
}
