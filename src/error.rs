//! Error types for the SecureView client

use thiserror::Error;

/// Message used when a failure carries no text of its own.
pub const FALLBACK_FETCH_MESSAGE: &str = "Failed to fetch data";

#[derive(Debug, Error)]
pub enum Error {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("No authentication token received")]
    MissingToken,

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// Free-form failure raised by a page fetcher
    #[error("{0}")]
    Fetch(String),
}

impl Error {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message suitable for showing to the user, falling back to a generic
    /// one when the error has none.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_FETCH_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passthrough() {
        assert_eq!(Error::fetch("Network down").user_message(), "Network down");
        let http = Error::Http {
            status: 404,
            message: "Camera not found".to_string(),
        };
        assert_eq!(http.user_message(), "Camera not found");
        assert_eq!(http.status(), Some(404));
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(Error::fetch("").user_message(), FALLBACK_FETCH_MESSAGE);
        assert_eq!(Error::fetch("  ").user_message(), FALLBACK_FETCH_MESSAGE);
    }
}
