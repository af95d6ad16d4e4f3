//! Container registry vanity-host redirector.
//!
//! Fronts a single upstream registry (ghcr.io by default) under a set of
//! public organization aliases. Requests addressed to `/v2/{alias}/...` are
//! forwarded to the canonical organization upstream, and the pieces of the
//! response that name the upstream (auth challenges, pagination links,
//! tag-list names) are rewritten back to the alias.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod rewrite;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rewrite::OrgMapper;
