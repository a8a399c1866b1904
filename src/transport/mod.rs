//! HTTP transport and its error type.

pub mod http;

pub use http::HttpTransport;

use thiserror::Error;

/// Failures where no usable response arrived. All of these are retryable.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Body(String),
}
