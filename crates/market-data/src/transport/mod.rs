//! Transport capability used to fetch listing pages.
//!
//! The pipeline only needs `fetch(address) -> (status, body)`. Connection
//! pooling, redirects and decompression belong to the implementation; the
//! body handed back must already be decoded.

mod http;

use async_trait::async_trait;

use crate::errors::TransportError;

pub use http::{HttpTransport, HttpTransportConfig};

/// A fully read response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded body bytes.
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text. Invalid UTF-8 sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Fetches a single address.
///
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<FetchResponse, TransportError>;
}
