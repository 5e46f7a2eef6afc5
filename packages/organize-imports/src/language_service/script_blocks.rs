//! Which parts of a file are script, and in what dialect.
//!
//! Plain script files are a single block covering the whole text. Vue
//! single-file components contribute one block per `<script>` element.

use once_cell::sync::Lazy;
use oxc_span::SourceType;
use regex::Regex;
use ts::{LanguageServiceError, ScriptKind};

static VUE_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").unwrap());

static LANG_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\blang\s*=\s*["']?([a-z]+)"#).unwrap());

/// What a `parser` option (or file extension) says about the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Script(ScriptKind),
    Vue,
}

impl DocumentKind {
    /// Pick the document kind from the host's `parser` name, falling back to
    /// the file extension when no parser is given.
    pub fn resolve(parser: Option<&str>, file_name: &str) -> Result<Self, LanguageServiceError> {
        let is_tsx = file_name.to_ascii_lowercase().ends_with(".tsx");
        match parser {
            Some("typescript") | Some("babel-ts") => Ok(DocumentKind::Script(if is_tsx {
                ScriptKind::TSX
            } else {
                ScriptKind::TS
            })),
            Some("babel") | Some("babel-flow") | Some("flow") | Some("acorn") | Some("espree")
            | Some("meriyah") => Ok(DocumentKind::Script(ScriptKind::JSX)),
            Some("vue") => Ok(DocumentKind::Vue),
            Some(other) => Err(LanguageServiceError::UnsupportedParser(other.to_string())),
            None => Ok(Self::from_extension(file_name)),
        }
    }

    fn from_extension(file_name: &str) -> Self {
        let lower = file_name.to_ascii_lowercase();
        let extension = lower.rsplit_once('.').map_or("", |(_, ext)| ext);
        match extension {
            "tsx" => DocumentKind::Script(ScriptKind::TSX),
            "js" | "jsx" | "mjs" | "cjs" => DocumentKind::Script(ScriptKind::JSX),
            "vue" => DocumentKind::Vue,
            _ => DocumentKind::Script(ScriptKind::TS),
        }
    }
}

pub fn source_type(kind: ScriptKind) -> SourceType {
    match kind {
        ScriptKind::TS => SourceType::ts(),
        ScriptKind::TSX => SourceType::tsx(),
        ScriptKind::JSX => SourceType::jsx(),
    }
}

/// A run of script text inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'t> {
    /// Byte offset of `text` within the whole document.
    pub offset: usize,
    pub text: &'t str,
    pub kind: ScriptKind,
    /// Set for blocks lifted out of another language (Vue templates can use
    /// bindings the script itself never references).
    pub embedded: bool,
}

pub fn script_blocks(kind: DocumentKind, text: &str) -> Vec<ScriptBlock<'_>> {
    match kind {
        DocumentKind::Script(kind) => vec![ScriptBlock {
            offset: 0,
            text,
            kind,
            embedded: false,
        }],
        DocumentKind::Vue => VUE_SCRIPT
            .captures_iter(text)
            .filter_map(|caps| {
                let attributes = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2)?;
                Some(ScriptBlock {
                    offset: body.start(),
                    text: body.as_str(),
                    kind: vue_script_kind(attributes),
                    embedded: true,
                })
            })
            .collect(),
    }
}

fn vue_script_kind(attributes: &str) -> ScriptKind {
    let lang = LANG_ATTRIBUTE
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());
    match lang.as_deref() {
        Some("ts") => ScriptKind::TS,
        Some("tsx") => ScriptKind::TSX,
        _ => ScriptKind::JSX,
    }
}
