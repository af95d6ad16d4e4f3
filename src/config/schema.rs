//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the registry redirector.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Plain-HTTP listener (used when SSL is disabled).
    pub listener: ListenerConfig,

    /// Upstream registry.
    pub upstream: UpstreamConfig,

    /// Public alias → upstream organization.
    pub org_mapping: BTreeMap<String, String>,

    /// Certificate-backed HTTPS serving.
    pub ssl: SslConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            org_mapping: default_org_mapping(),
            ssl: SslConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

fn default_org_mapping() -> BTreeMap<String, String> {
    [
        ("appscode", "appscode"),
        ("charts", "appscode-charts"),
        ("kubedb", "kubedb"),
        ("kubeform", "kubeform"),
        ("kubestash", "kubestash"),
        ("kubevault", "kubevault"),
        ("library", "appscode-images"),
        ("stash", "stashed"),
        ("voyager", "voyagermesh"),
    ]
    .into_iter()
    .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
    .collect()
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address without port (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Port used when SSL is not enabled.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ListenerConfig {
    /// `bind_address:port`.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Upstream registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Registry authority (host or host:port), e.g. "ghcr.io".
    pub host: String,

    /// "https" in production; "http" for local registries.
    pub scheme: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            host: "ghcr.io".to_string(),
            scheme: "https".to_string(),
        }
    }
}

/// HTTPS serving. Certificates are provisioned externally into `cert_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SslConfig {
    pub enabled: bool,

    /// Directory holding `cert.pem` and `key.pem`.
    pub cert_dir: String,

    /// Contact address registered with the certificate authority.
    pub email: Option<String>,

    /// Hostnames served over HTTPS.
    pub hosts: Vec<String>,

    pub https_port: u16,

    /// Port of the HTTP → HTTPS redirect listener.
    pub http_port: u16,
}

impl Default for SslConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cert_dir: "certs".to_string(),
            email: None,
            hosts: vec![
                "r.appscode.com".to_string(),
                "r.appscode.ninja".to_string(),
                "r.byte.builders".to_string(),
            ],
            https_port: 443,
            http_port: 80,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Time allowed until response headers are ready, in seconds.
    pub request_secs: u64,

    /// Idle pooled upstream connection lifetime in seconds.
    pub idle_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 300,
            idle_secs: 120,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
