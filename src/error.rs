//! Error types for the accountability client

use thiserror::Error;

/// Every failure a facade operation can surface.
///
/// Input validation variants are raised before any network call is made.
/// Remote errors keep the status and body exactly as received.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing credential '{field}': pass it explicitly or set the {env_var} environment variable")]
    MissingCredential {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("token issuance failed with status {status}: {message}")]
    TokenIssuance { status: u16, message: String },

    #[error("invalid document number '{input}': expected 11 or 14 digits, found {digits}")]
    InvalidDocument { input: String, digits: usize },

    #[error("invalid postal code '{input}': expected 8 digits, found {digits}")]
    InvalidPostalCode { input: String, digits: usize },

    #[error("invalid date '{0}': expected YYYY-MM-DD, DD/MM/YYYY, DD-MM-YYYY, YYYYMMDD or an ISO date-time")]
    InvalidDate(String),

    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("authentication rejected after token renewal with status {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("remote API returned status {status}: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Status code carried by remote failures, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::TokenIssuance { status, .. }
            | ApiError::Authentication { status, .. }
            | ApiError::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for errors raised while validating caller input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidDocument { .. }
                | ApiError::InvalidPostalCode { .. }
                | ApiError::InvalidDate(_)
                | ApiError::MissingParameter(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
