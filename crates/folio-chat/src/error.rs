//! Error types for the chat engine.
//!
//! Response selection never fails; these cover catalogue construction and
//! menu navigation only.

use folio_core::error::FolioError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("category {category} has no question #{index}")]
    UnknownQuestion { category: String, index: usize },
    #[error("catalogue error: {0}")]
    Catalogue(String),
}

impl From<FolioError> for ChatError {
    fn from(err: FolioError) -> Self {
        ChatError::Catalogue(err.to_string())
    }
}
