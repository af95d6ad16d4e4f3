//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered route table, first match wins)
//!     → matcher.rs (path shape tests, variable capture)
//!     → Return: Route (ApiProbe | Token | Proxy{org, repo, rest} | Redirect)
//! ```
//!
//! # Design Decisions
//! - Table built once, immutable at runtime
//! - No regex: exact and segment matching only
//! - Deterministic: same path always yields the same route
//! - Catch-all last, so every path resolves to some route

pub mod matcher;
pub mod router;

pub use matcher::{PathMatcher, ProxyTarget};
pub use router::{Route, Router};
