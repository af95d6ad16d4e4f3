//! TLS configuration and certificate loading.

use std::path::{Path, PathBuf};

use axum_server::tls_rustls::RustlsConfig;

pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "key.pem";

/// Certificate and key paths inside `cert_dir`.
pub fn cert_paths(cert_dir: &Path) -> (PathBuf, PathBuf) {
    (cert_dir.join(CERT_FILE), cert_dir.join(KEY_FILE))
}

/// Load TLS configuration from the PEM files in `cert_dir`.
pub async fn load_tls_config(cert_dir: &Path) -> Result<RustlsConfig, std::io::Error> {
    let (cert_path, key_path) = cert_paths(cert_dir);

    for path in [&cert_path, &key_path] {
        if !path.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("TLS file not found: {:?}", path),
            ));
        }
    }

    RustlsConfig::from_pem_file(cert_path, key_path).await
}
