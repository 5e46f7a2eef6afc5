use thiserror::Error;
use ts::LanguageServiceError;

use crate::text_changes::TextChangeError;

/// Why an `organize` call produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrganizeError {
    #[error("failed to parse {file_name}: {message}")]
    Parse { file_name: String, message: String },

    #[error("unsupported parser: {0}")]
    UnsupportedParser(String),

    #[error("language service has no source file named {0}")]
    UnknownFile(String),

    #[error(transparent)]
    TextChanges(#[from] TextChangeError),
}

impl From<LanguageServiceError> for OrganizeError {
    fn from(error: LanguageServiceError) -> Self {
        match error {
            LanguageServiceError::Parse { file_name, message } => {
                OrganizeError::Parse { file_name, message }
            }
            LanguageServiceError::UnsupportedParser(parser) => {
                OrganizeError::UnsupportedParser(parser)
            }
            LanguageServiceError::UnknownFile(file_name) => OrganizeError::UnknownFile(file_name),
        }
    }
}
