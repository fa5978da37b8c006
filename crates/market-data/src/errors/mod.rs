//! Error types for listing-page scraping.
//!
//! This module provides:
//! - [`TransportError`]: failures raised by a [`Transport`](crate::transport::Transport)
//! - [`ScrapeError`]: every reason a single listing lookup can fail to produce a price

use std::time::Duration;

use thiserror::Error;

/// Errors raised by the transport collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response arrived but its body could not be read or decoded.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure (used by non-HTTP transports).
    #[error("Transport error: {0}")]
    Other(String),
}

/// Why a listing lookup ended without a price.
///
/// None of these are fatal to a batch. They describe a single record's
/// lookup and are carried inside the resolver outcome for logging.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The transport failed before a status code was received,
    /// or while reading the body.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote host answered with HTTP 429.
    #[error("Rate limited by {host}")]
    RateLimited {
        /// Host that rate limited the request
        host: String,
    },

    /// The remote host answered with a non-success status.
    #[error("HTTP status {status} from {address}")]
    HttpStatus {
        /// Status code received
        status: u16,
        /// Address that was requested
        address: String,
    },

    /// The fetch did not complete within the configured timeout.
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The page carried no price marker, or the text after it was not a price.
    #[error("No price found on page {address}")]
    PriceNotFound {
        /// Address of the page that was inspected
        address: String,
    },
}

impl ScrapeError {
    /// Returns true when the failure came from the remote host throttling us.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ScrapeError::HttpStatus {
            status: 503,
            address: "https://example.com/dp/X1/".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "HTTP status 503 from https://example.com/dp/X1/"
        );

        let error = ScrapeError::RateLimited {
            host: "example.com".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited by example.com");

        let error = ScrapeError::Timeout(Duration::from_secs(2));
        assert_eq!(format!("{}", error), "Fetch timed out after 2s");
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let error: ScrapeError = TransportError::Other("connection reset".to_string()).into();
        assert_eq!(format!("{}", error), "Transport error: connection reset");
        assert!(!error.is_rate_limited());
    }

    #[test]
    fn test_rate_limited_flag() {
        let error = ScrapeError::RateLimited {
            host: "example.com".to_string(),
        };
        assert!(error.is_rate_limited());
    }
}
