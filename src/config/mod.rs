//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)          CLI flags
//!     → loader.rs (parse)  ──→ cli.rs (flags overwrite file values)
//!     → validation.rs (semantic checks, all errors at once)
//!     → ProxyConfig (validated, immutable)
//!     → OrgMapper + upstream client built once, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the mapping never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{read_config, ConfigError};
pub use schema::ProxyConfig;
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SslConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
