//! Network layer subsystem (SSL mode).
//!
//! # Data Flow
//! ```text
//! :https → tls.rs (cert.pem / key.pem from cert_dir) → HttpServer::run_tls
//! :http  → redirect.rs (allowed host → 308 https://host/path?query, else 404)
//! ```
//!
//! # Design Decisions
//! - Certificates are provisioned by an external ACME client into cert_dir
//! - Plain HTTP is only ever a redirect, never proxied

pub mod redirect;
pub mod tls;
