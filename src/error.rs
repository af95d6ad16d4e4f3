//! Error types shared across subsystems.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure while serving a single proxied request.
///
/// Every variant is terminal for the request: it is reported once as a 500
/// with the error text as body and never retried.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),

    #[error("decoding list response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("encoding list response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Malformed `alias=canonical` mapping entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("mapping entry {0:?} is not of the form alias=canonical")]
    MissingSeparator(String),

    #[error("mapping entry {0:?} has an empty alias or canonical name")]
    Empty(String),
}

/// Failure while assembling the server at startup.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("building upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("loading TLS material: {0}")]
    Tls(#[source] std::io::Error),

    #[error("server I/O: {0}")]
    Io(#[from] std::io::Error),
}
