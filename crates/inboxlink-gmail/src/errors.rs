//! Error types for the Gmail integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GmailError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Account not found with {0}")]
    AccountNotFound(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing credentials for account {0}")]
    MissingCredentials(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Gmail API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GmailError {
    fn from(err: reqwest::Error) -> Self {
        GmailError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for GmailError {
    fn from(err: serde_json::Error) -> Self {
        GmailError::InvalidPayload(err.to_string())
    }
}
