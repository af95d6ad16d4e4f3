//! HTTP client for the upstream registry.

use std::time::Duration;

use reqwest::{redirect, Client};

use crate::config::{TimeoutConfig, UpstreamConfig};

/// Upstream registry endpoint plus the clients used to reach it.
///
/// `direct` never follows redirects so 3xx answers (blob storage hand-offs,
/// token endpoints) reach the caller untouched. `following` is used for the
/// organization-independent API probe only.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    direct: Client,
    following: Client,
    scheme: String,
    host: String,
}

impl UpstreamClient {
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let builder = || {
            Client::builder()
                .connect_timeout(Duration::from_secs(timeouts.connect_secs))
                .pool_idle_timeout(Duration::from_secs(timeouts.idle_secs))
        };

        Ok(Self {
            direct: builder().redirect(redirect::Policy::none()).build()?,
            following: builder().build()?,
            scheme: upstream.scheme.clone(),
            host: upstream.host.clone(),
        })
    }

    /// Upstream authority, e.g. `ghcr.io`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute upstream URL for a path (and optional query).
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}://{}{}", self.scheme, self.host, path_and_query)
    }

    pub fn direct(&self) -> &Client {
        &self.direct
    }

    pub fn following(&self) -> &Client {
        &self.following
    }
}
