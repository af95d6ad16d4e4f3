//! Request/response rewriting engine.
//!
//! # Data Flow
//! ```text
//! startup:
//!     org_mapping table (config / CLI)
//!     → org_mapper.rs (immutable alias ⇄ canonical lookups)
//!     → shared via Arc by every handler
//!
//! per request:
//!     inbound path / query
//!     → path.rs, scope.rs (alias → canonical)
//!     → upstream call
//!     → headers.rs (Www-Authenticate, Link: upstream → proxy/alias)
//!     → body.rs (tag-list `name`: canonical prefix stripped)
//! ```
//!
//! # Design Decisions
//! - All functions are pure; the only state is the mapper
//! - Unknown aliases are not errors, they simply fail to rewrite
//! - Reverse lookups are first match in lexicographic alias order

pub mod body;
pub mod headers;
pub mod org_mapper;
pub mod path;
pub mod scope;

pub use body::{rewrite_list_body, ListResponse};
pub use org_mapper::OrgMapper;
