//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the organization mapping is well formed
//! - Validate value ranges (ports valid, hosts present)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Path segments owned by fixed routes; an alias with one of these names
/// could never be reached through the redirect route.
const RESERVED_SEGMENTS: &[&str] = &["v2", "token"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream host is empty")]
    EmptyUpstreamHost,

    #[error("upstream host {0:?} must be an authority without scheme or path")]
    MalformedUpstreamHost(String),

    #[error("unsupported upstream scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("org mapping has an empty alias or canonical name ({alias:?} = {canonical:?})")]
    EmptyMappingEntry { alias: String, canonical: String },

    #[error("org mapping entry {0:?} contains '/'")]
    SlashInMapping(String),

    #[error("alias {0:?} collides with a reserved route")]
    ReservedAlias(String),

    #[error("{0} port must be non-zero")]
    ZeroPort(&'static str),

    #[error("ssl is enabled but no hosts are configured")]
    NoSslHosts,
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let host = config.upstream.host.trim();
    if host.is_empty() {
        errors.push(ValidationError::EmptyUpstreamHost);
    } else if host.contains("://") || host.contains('/') {
        errors.push(ValidationError::MalformedUpstreamHost(host.to_string()));
    }
    if !matches!(config.upstream.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedScheme(config.upstream.scheme.clone()));
    }

    for (alias, canonical) in &config.org_mapping {
        if alias.is_empty() || canonical.is_empty() {
            errors.push(ValidationError::EmptyMappingEntry {
                alias: alias.clone(),
                canonical: canonical.clone(),
            });
            continue;
        }
        for name in [alias, canonical] {
            if name.contains('/') {
                errors.push(ValidationError::SlashInMapping(name.clone()));
            }
        }
        if RESERVED_SEGMENTS.contains(&alias.as_str()) {
            errors.push(ValidationError::ReservedAlias(alias.clone()));
        }
    }

    if config.ssl.enabled {
        if config.ssl.hosts.is_empty() {
            errors.push(ValidationError::NoSslHosts);
        }
        if config.ssl.https_port == 0 {
            errors.push(ValidationError::ZeroPort("https"));
        }
        if config.ssl.http_port == 0 {
            errors.push(ValidationError::ZeroPort("http"));
        }
    } else if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort("listener"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ProxyConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ProxyConfig::default();
        config.upstream.host = "https://ghcr.io".into();
        config.upstream.scheme = "ftp".into();
        config.org_mapping.insert("v2".into(), "x".into());
        config.org_mapping.insert("a/b".into(), "c".into());
        config.listener.port = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::MalformedUpstreamHost("https://ghcr.io".into())));
        assert!(errors.contains(&ValidationError::UnsupportedScheme("ftp".into())));
        assert!(errors.contains(&ValidationError::ReservedAlias("v2".into())));
        assert!(errors.contains(&ValidationError::SlashInMapping("a/b".into())));
        assert!(errors.contains(&ValidationError::ZeroPort("listener")));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_ssl_requires_hosts() {
        let mut config = ProxyConfig::default();
        config.ssl.enabled = true;
        config.ssl.hosts.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::NoSslHosts])
        );
    }

    #[test]
    fn test_shared_canonical_is_allowed() {
        let mut config = ProxyConfig::default();
        config.org_mapping.insert("images".into(), "appscode-images".into());
        assert!(validate_config(&config).is_ok());
    }
}
