use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// The catalog provider did not return a result. Network, authorization
    /// and provider-side failures all surface as this kind.
    #[error("Catalog unavailable while searching '{term}': {message}")]
    CatalogUnavailable { term: String, message: String },

    /// The caller cancelled the search before its results were merged.
    #[error("Search for '{term}' was cancelled")]
    Cancelled { term: String },
}

impl LibraryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LibraryError::Cancelled { .. })
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
