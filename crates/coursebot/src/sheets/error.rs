//! Error types for spreadsheet access.

use thiserror::Error;

/// Errors that can occur while reading or writing the spreadsheet.
#[derive(Debug, Error, Clone)]
pub enum SheetsError {
    /// Could not obtain an access token
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The API answered with a non-success status
    #[error("Sheets API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not what the API documents
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    Url { message: String },
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SheetsError::Decode {
                message: err.to_string(),
            }
        } else {
            SheetsError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for SheetsError {
    fn from(err: url::ParseError) -> Self {
        SheetsError::Url {
            message: err.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for SheetsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SheetsError::Auth {
            message: err.to_string(),
        }
    }
}
