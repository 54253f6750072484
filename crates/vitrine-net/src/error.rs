//! Error types for fragment loading.

use thiserror::Error;

use crate::fragment::FragmentKind;

/// Fragment loading errors.
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The HTTP request itself failed (connection, timeout, body).
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Failed to load {kind}: {status}")]
    HttpStatus {
        kind: FragmentKind,
        status: reqwest::StatusCode,
    },

    /// The fetched document has no fragment root element.
    #[error("{} element not found in {kind}.html", .kind.title())]
    MissingRoot { kind: FragmentKind },

    /// A page or fragment URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A CSS selector failed to parse.
    #[error("Invalid selector {0:?}")]
    Selector(String),
}

/// Result type for fragment operations.
pub type Result<T> = std::result::Result<T, FragmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = FragmentError::MissingRoot {
            kind: FragmentKind::Header,
        };
        assert_eq!(err.to_string(), "Header element not found in header.html");

        let err = FragmentError::HttpStatus {
            kind: FragmentKind::Footer,
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Failed to load footer: 404 Not Found");
    }
}
