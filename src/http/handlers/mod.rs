//! Route handlers.
//!
//! Each handler owns one inbound request and produces exactly one response.
//! Upstream failures are terminal: one 500 with the error text, no retry.

pub mod probe;
pub mod proxy;
pub mod redirect;
pub mod token;

pub use probe::api_probe;
pub use proxy::proxy;
pub use redirect::redirect;
pub use token::token;
