//! Command-line overrides layered over the TOML file.

use std::path::PathBuf;

use clap::Parser;

use super::loader::{read_config, ConfigError};
use super::validation::validate_config;
use super::schema::ProxyConfig;
use crate::rewrite::org_mapper::parse_mapping_entry;

#[derive(Parser, Debug)]
#[command(name = "registry-redirect")]
#[command(about = "Reverse proxy serving a container registry under vanity organization aliases", long_about = None)]
pub struct Cli {
    /// TOML configuration file. Flags below override it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Port used when SSL is not enabled
    #[arg(long)]
    pub port: Option<u16>,

    /// Set true to enable SSL with certificates from --ssl.cert-dir
    #[arg(long)]
    pub ssl: bool,

    /// Directory where certs are stored
    #[arg(long = "ssl.cert-dir")]
    pub cert_dir: Option<String>,

    /// Email registered with the certificate authority
    #[arg(long = "ssl.email")]
    pub cert_email: Option<String>,

    /// Hosts served over HTTPS
    #[arg(long = "ssl.hosts", value_delimiter = ',')]
    pub hosts: Vec<String>,

    /// Proxy org to upstream org mappings (alias=canonical,...)
    #[arg(long = "org-mapping", value_delimiter = ',', value_parser = parse_mapping_entry)]
    pub org_mapping: Vec<(String, String)>,

    /// Upstream registry host
    #[arg(long)]
    pub upstream: Option<String>,
}

impl Cli {
    /// Read the file named by `--config` (defaults otherwise), apply the
    /// flags on top, then validate the result.
    pub fn load(mut self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match self.config.take() {
            Some(path) => read_config(&path)?,
            None => ProxyConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Overwrite every value that was given on the command line.
    /// `--org-mapping` replaces the whole table.
    pub fn apply(self, config: &mut ProxyConfig) {
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if self.ssl {
            config.ssl.enabled = true;
        }
        if let Some(cert_dir) = self.cert_dir {
            config.ssl.cert_dir = cert_dir;
        }
        if self.cert_email.is_some() {
            config.ssl.email = self.cert_email;
        }
        if !self.hosts.is_empty() {
            config.ssl.hosts = self.hosts;
        }
        if !self.org_mapping.is_empty() {
            config.org_mapping = self.org_mapping.into_iter().collect();
        }
        if let Some(upstream) = self.upstream {
            config.upstream.host = upstream;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    fn file_config() -> ProxyConfig {
        parse_config(
            r#"
[listener]
port = 9000

[upstream]
host = "registry.example.com"

[ssl]
cert_dir = "/etc/certs"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_flag_overrides_file_value() {
        let mut config = file_config();
        Cli::try_parse_from(["registry-redirect", "--port", "7000", "--upstream", "ghcr.io"])
            .unwrap()
            .apply(&mut config);

        assert_eq!(config.listener.port, 7000);
        assert_eq!(config.upstream.host, "ghcr.io");
    }

    #[test]
    fn test_unset_flags_keep_file_values() {
        let mut config = file_config();
        Cli::try_parse_from(["registry-redirect", "--ssl.email", "ops@example.com"])
            .unwrap()
            .apply(&mut config);

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream.host, "registry.example.com");
        assert_eq!(config.ssl.cert_dir, "/etc/certs");
        assert!(!config.ssl.enabled);
        assert_eq!(config.org_mapping.len(), 9);
        assert_eq!(config.ssl.email.as_deref(), Some("ops@example.com"));
    }

    #[test]
    fn test_org_mapping_replaces_default_table() {
        let mut config = ProxyConfig::default();
        assert_eq!(config.org_mapping.len(), 9);

        Cli::try_parse_from(["registry-redirect", "--org-mapping", "a=b"])
            .unwrap()
            .apply(&mut config);

        assert_eq!(config.org_mapping.len(), 1);
        assert_eq!(config.org_mapping.get("a").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_list_flags_split_on_commas() {
        let cli = Cli::try_parse_from([
            "registry-redirect",
            "--ssl",
            "--ssl.hosts",
            "r.example.com,s.example.com",
            "--org-mapping",
            "x=y,z=w",
        ])
        .unwrap();
        let mut config = ProxyConfig::default();
        cli.apply(&mut config);

        assert!(config.ssl.enabled);
        assert_eq!(config.ssl.hosts, vec!["r.example.com", "s.example.com"]);
        assert_eq!(config.org_mapping.len(), 2);
    }

    #[test]
    fn test_load_validates_after_overrides() {
        let err = Cli::try_parse_from(["registry-redirect", "--port", "0"])
            .unwrap()
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_malformed_mapping_rejected() {
        assert!(Cli::try_parse_from(["registry-redirect", "--org-mapping", "nope"]).is_err());
    }

    #[test]
    fn test_load_reads_file_then_flags() {
        let path = std::env::temp_dir().join(format!(
            "registry-redirect-cli-{}.toml",
            uuid::Uuid::new_v4()
        ));
        std::fs::write(&path, "[listener]\nport = 9000\n\n[org_mapping]\nfoo = \"bar\"\n").unwrap();

        let config = Cli::try_parse_from([
            "registry-redirect",
            "--config",
            path.to_str().unwrap(),
            "--upstream",
            "mirror.example.com",
        ])
        .unwrap()
        .load();
        let _ = std::fs::remove_file(&path);
        let config = config.unwrap();

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream.host, "mirror.example.com");
        assert_eq!(config.org_mapping.len(), 1);
    }
}
