//! Path matching logic.
//!
//! # Design Decisions
//! - Matching is on the raw (still percent-encoded) path so captured
//!   segments can be forwarded upstream without a decode/encode round-trip
//! - Path matching is case-sensitive
//! - `{org}` and `{repo}` are single non-empty segments, `{rest}` may span
//!   several segments and may be empty

const V2_PREFIX: &str = "/v2/";

/// Path variables captured for the namespaced proxy route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    pub org: String,
    pub repo: String,
    pub rest: String,
}

/// Shape test for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMatcher {
    /// Path equals one of the given literals.
    Exact(&'static [&'static str]),
    /// `/v2/{org}/{repo}/{rest...}`.
    Namespaced,
    /// Always matches.
    Any,
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captures {
    None,
    Namespaced(ProxyTarget),
}

impl PathMatcher {
    /// Returns captures if `path` matches this shape.
    pub fn matches(&self, path: &str) -> Option<Captures> {
        match self {
            PathMatcher::Exact(literals) => literals
                .iter()
                .any(|literal| *literal == path)
                .then_some(Captures::None),
            PathMatcher::Namespaced => match_namespaced(path).map(Captures::Namespaced),
            PathMatcher::Any => Some(Captures::None),
        }
    }
}

fn match_namespaced(path: &str) -> Option<ProxyTarget> {
    let tail = path.strip_prefix(V2_PREFIX)?;
    let (org, tail) = tail.split_once('/')?;
    let (repo, rest) = tail.split_once('/')?;
    if org.is_empty() || repo.is_empty() {
        return None;
    }
    Some(ProxyTarget {
        org: org.to_string(),
        repo: repo.to_string(),
        rest: rest.to_string(),
    })
}
