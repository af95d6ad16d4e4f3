//! Route lookup and dispatch.
//!
//! # Design Decisions
//! - Ordered table of (matcher, route kind), evaluated top-down
//! - Immutable after construction (thread-safe without locks)
//! - Catch-all entry guarantees a route for every path

use super::matcher::{Captures, PathMatcher, ProxyTarget};

/// Handler selected for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Registry capability check (`/v2`, `/v2/`).
    ApiProbe,
    /// Token exchange (`/token`).
    Token,
    /// Aliased resource proxy.
    Proxy(ProxyTarget),
    /// Alias-aware redirect to upstream.
    Redirect,
}

impl Route {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::ApiProbe => "api_probe",
            Route::Token => "token",
            Route::Proxy(_) => "proxy",
            Route::Redirect => "redirect",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    ApiProbe,
    Token,
    Proxy,
    Redirect,
}

/// Priority-ordered route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(PathMatcher, RouteKind)>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: vec![
                (PathMatcher::Exact(&["/v2", "/v2/"]), RouteKind::ApiProbe),
                (PathMatcher::Exact(&["/token"]), RouteKind::Token),
                (PathMatcher::Namespaced, RouteKind::Proxy),
                (PathMatcher::Any, RouteKind::Redirect),
            ],
        }
    }

    /// Resolve a request path to its route. First match wins.
    pub fn resolve(&self, path: &str) -> Route {
        for (matcher, kind) in &self.routes {
            let Some(captures) = matcher.matches(path) else {
                continue;
            };
            match (kind, captures) {
                (RouteKind::ApiProbe, _) => return Route::ApiProbe,
                (RouteKind::Token, _) => return Route::Token,
                (RouteKind::Proxy, Captures::Namespaced(target)) => return Route::Proxy(target),
                (RouteKind::Proxy, Captures::None) => continue,
                (RouteKind::Redirect, _) => return Route::Redirect,
            }
        }
        Route::Redirect
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
