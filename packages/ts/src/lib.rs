//! TypeScript-compatible interfaces for the organize-imports pipeline.
//! This crate serves as the shared contract between the pipeline and any
//! language service that can organize imports.

use std::fmt;

use serde::Deserialize;

pub mod language_service;

pub use language_service::*;

// --- Enums ---

/// Where `type`-only named specifiers go when sorting an import's named bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizeImportsTypeOrder {
    #[default]
    Last,
    First,
    Inline,
}

impl fmt::Display for OrganizeImportsTypeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrganizeImportsTypeOrder::Last => "last",
            OrganizeImportsTypeOrder::First => "first",
            OrganizeImportsTypeOrder::Inline => "inline",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptKind {
    JSX,
    TS,
    TSX,
}

impl ScriptKind {
    pub fn is_jsx(self) -> bool {
        matches!(self, ScriptKind::JSX | ScriptKind::TSX)
    }
}

// --- Text Changes ---

/// A span of text, measured in UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether two spans share at least one byte.
    ///
    /// Two empty spans at the same position do not overlap; neither does an
    /// empty span sitting on the boundary of a non-empty one.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Replace `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextChange {
    pub fn new(start: usize, end: usize, new_text: impl Into<String>) -> Self {
        Self {
            span: TextSpan::from_bounds(start, end),
            new_text: new_text.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end()
    }

    /// Move the change by `delta` bytes, used when a change was computed
    /// against a slice of a larger document.
    pub fn shifted(mut self, delta: usize) -> Self {
        self.span.start += delta;
        self
    }
}

/// All changes a language service wants to make to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTextChanges {
    pub file_name: String,
    pub text_changes: Vec<TextChange>,
    pub is_new_file: bool,
}

// --- Organize Imports ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizeImportsArgs {
    pub file_name: String,
    pub skip_destructive_code_actions: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserPreferences {
    pub organize_imports_type_order: OrganizeImportsTypeOrder,
}
