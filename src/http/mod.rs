//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, "got request" observer with redaction)
//!     → routing::Router (ApiProbe | Token | Proxy | Redirect)
//!     → handlers/* (rewrite target, call upstream via client.rs)
//!     → response.rs (copy + rewrite upstream headers, stream body)
//!     → Send to client
//! ```

pub mod client;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use client::UpstreamClient;
pub use request::{log_request, UuidRequestId, X_REQUEST_ID, X_REDIRECTED};
pub use server::{AppState, HttpServer};
