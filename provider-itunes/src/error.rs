//! Error types for the iTunes catalog provider

use bridge_traits::error::BridgeError;
use thiserror::Error;

/// iTunes provider errors
#[derive(Error, Debug)]
pub enum ItunesError {
    /// API request returned a non-success status
    #[error("iTunes API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Bridge error
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Result type for iTunes operations
pub type Result<T> = std::result::Result<T, ItunesError>;

impl From<ItunesError> for BridgeError {
    fn from(error: ItunesError) -> Self {
        match error {
            ItunesError::ApiError {
                status_code,
                message,
            } => BridgeError::OperationFailed(format!(
                "API error (status {}): {}",
                status_code, message
            )),
            ItunesError::ParseError(msg) => {
                BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            ItunesError::Bridge(e) => e,
        }
    }
}
