//! Error types for rickdex-client

use thiserror::Error;

/// Why a catalog request failed
///
/// The `Display` text is what the search coordinator shows to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The query could not be turned into a request URL
    #[error("Invalid search URL")]
    InvalidInput,

    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// The catalog has no character matching the query
    #[error("No characters found")]
    NotFound,

    #[error("Invalid response from server")]
    BadResponse { status: u16 },

    #[error("Failed to parse response: {0}")]
    DecodeFailure(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::NetworkFailure(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
