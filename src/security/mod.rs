//! Security-sensitive header handling.
//!
//! # Data Flow
//! ```text
//! inbound headers ─┬─→ headers.rs::redact (copy) → logs
//!                  └─→ headers.rs::forward_request_headers → upstream
//! upstream headers ─→ headers.rs::copy_response_headers → client
//! ```
//!
//! # Design Decisions
//! - Credentials are forwarded untouched; the proxy never decides auth
//! - Redaction works on a clone, never on live request state

pub mod headers;
