//! Language service contract.
//!
//! Only the slice of the TypeScript language service that organizes imports
//! is modelled here. Implementations own their parsing; callers only see the
//! resulting text changes.

use crate::{FileTextChanges, OrganizeImportsArgs, UserPreferences};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageServiceError {
    #[error("failed to parse {file_name}: {message}")]
    Parse { file_name: String, message: String },

    #[error("unsupported parser: {0}")]
    UnsupportedParser(String),

    #[error("no source file named {0}")]
    UnknownFile(String),
}

pub trait LanguageService {
    /// Compute the edits that organize the imports of `args.file_name`.
    ///
    /// Returns at most one [`FileTextChanges`]; an empty vector means the
    /// imports are already organized. Implementations must never remove a
    /// declaration or binding when `args.skip_destructive_code_actions` is set.
    fn organize_imports(
        &self,
        args: &OrganizeImportsArgs,
        preferences: &UserPreferences,
    ) -> Result<Vec<FileTextChanges>, LanguageServiceError>;
}

impl<T: LanguageService + ?Sized> LanguageService for Box<T> {
    fn organize_imports(
        &self,
        args: &OrganizeImportsArgs,
        preferences: &UserPreferences,
    ) -> Result<Vec<FileTextChanges>, LanguageServiceError> {
        (**self).organize_imports(args, preferences)
    }
}
