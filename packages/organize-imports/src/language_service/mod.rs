//! oxc-backed language service.
//!
//! Implements [`ts::LanguageService`] for a single in-memory document. The
//! document is split into script blocks, each block is parsed and organized
//! independently, and the resulting changes are mapped back onto the document.

pub mod organize_imports;
pub mod script_blocks;

#[cfg(test)]
mod test;

use ts::{
    FileTextChanges, LanguageService, LanguageServiceError, OrganizeImportsArgs, UserPreferences,
};

pub use organize_imports::{organize_block, OrganizeSettings};
pub use script_blocks::{script_blocks, DocumentKind, ScriptBlock};

/// A language service over exactly one document.
#[derive(Debug, Clone)]
pub struct OxcLanguageService {
    file_name: String,
    text: String,
    document_kind: DocumentKind,
}

impl OxcLanguageService {
    pub fn new(
        parser: Option<&str>,
        file_name: &str,
        text: &str,
    ) -> Result<Self, LanguageServiceError> {
        Ok(Self {
            file_name: file_name.to_string(),
            text: text.to_string(),
            document_kind: DocumentKind::resolve(parser, file_name)?,
        })
    }

    pub fn document_kind(&self) -> DocumentKind {
        self.document_kind
    }
}

impl LanguageService for OxcLanguageService {
    fn organize_imports(
        &self,
        args: &OrganizeImportsArgs,
        preferences: &UserPreferences,
    ) -> Result<Vec<FileTextChanges>, LanguageServiceError> {
        if args.file_name != self.file_name {
            return Err(LanguageServiceError::UnknownFile(args.file_name.clone()));
        }

        let settings = OrganizeSettings {
            skip_destructive_code_actions: args.skip_destructive_code_actions,
            type_order: preferences.organize_imports_type_order,
        };

        let mut text_changes = Vec::new();
        for block in script_blocks(self.document_kind, &self.text) {
            let changes = organize_block(&self.file_name, &block, settings)?;
            text_changes.extend(changes.into_iter().map(|change| change.shifted(block.offset)));
        }

        if text_changes.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![FileTextChanges {
            file_name: self.file_name.clone(),
            text_changes,
            is_new_file: false,
        }])
    }
}

/// Builds a language service for one document.
pub trait LanguageServiceFactory: Send + Sync {
    fn create(
        &self,
        parser: Option<&str>,
        file_name: &str,
        code: &str,
    ) -> Result<Box<dyn LanguageService>, LanguageServiceError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OxcLanguageServiceFactory;

impl LanguageServiceFactory for OxcLanguageServiceFactory {
    fn create(
        &self,
        parser: Option<&str>,
        file_name: &str,
        code: &str,
    ) -> Result<Box<dyn LanguageService>, LanguageServiceError> {
        Ok(Box::new(OxcLanguageService::new(parser, file_name, code)?))
    }
}
