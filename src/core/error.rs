use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Catalog source is malformed: {path}: {reason}")]
    SourceMalformed { path: PathBuf, reason: String },

    #[error("Catalog not loaded: call load() before querying")]
    CatalogNotLoaded,

    #[error("Catalog already loaded")]
    AlreadyLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CatalogError::SourceMalformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
