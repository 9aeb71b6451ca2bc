use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Client, Identity};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::{AuthError, Result};

/// TLS material for the identity service connection. Empty paths mean "not set".
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TransportConfig {
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub ca_file: Option<PathBuf>,
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub key_file: Option<PathBuf>,
    #[serde(default, deserialize_with = "empty_path_as_none")]
    pub cert_file: Option<PathBuf>,
    #[serde(default, rename = "insecure")]
    pub insecure_skip_verify: bool,
}

impl TransportConfig {
    pub fn new(ca_file: &str, key_file: &str, cert_file: &str, insecure: bool) -> Self {
        Self {
            ca_file: non_empty_path(ca_file),
            key_file: non_empty_path(key_file),
            cert_file: non_empty_path(cert_file),
            insecure_skip_verify: insecure,
        }
    }

    pub fn insecure() -> Self {
        Self {
            insecure_skip_verify: true,
            ..Default::default()
        }
    }
}

fn non_empty_path(path: &str) -> Option<PathBuf> {
    Some(path).filter(|p| !p.is_empty()).map(PathBuf::from)
}

fn empty_path_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Option::<String>::deserialize(deserializer)?;
    Ok(path.as_deref().and_then(non_empty_path))
}

/// Resolved TLS behaviour of a transport.
#[derive(Debug, Clone, Default)]
pub enum TlsPolicy {
    /// reqwest defaults: built-in roots, no client certificate
    #[default]
    Default,
    /// certificate verification disabled
    Insecure,
    Verified {
        roots: Option<TrustRoots>,
        identity: Option<ClientIdentity>,
    },
}

#[derive(Debug, Clone)]
pub struct TrustRoots {
    pub path: PathBuf,
    certificates: Vec<Certificate>,
}

#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub cert_path: PathBuf,
    identity: Identity,
}

impl TlsPolicy {
    /// Load the material named by `config`.
    ///
    /// `insecure_skip_verify` wins over everything else; the files are not
    /// even read in that case.
    pub fn resolve(config: &TransportConfig) -> Result<Self> {
        if config.insecure_skip_verify {
            return Ok(TlsPolicy::Insecure);
        }

        let roots = config.ca_file.as_deref().map(load_trust_roots).transpose()?;

        let identity = match (&config.cert_file, &config.key_file) {
            (Some(cert_path), Some(key_path)) => Some(load_identity(cert_path, key_path)?),
            (None, None) => None,
            (cert, key) => {
                warn!(?cert, ?key, "client certificate and key must both be set, mutual tls disabled");
                None
            }
        };

        if roots.is_none() && identity.is_none() {
            return Ok(TlsPolicy::Default);
        }
        Ok(TlsPolicy::Verified { roots, identity })
    }

    pub fn is_insecure(&self) -> bool {
        matches!(self, TlsPolicy::Insecure)
    }

    pub fn ca_file(&self) -> Option<&Path> {
        match self {
            TlsPolicy::Verified { roots: Some(roots), .. } => Some(&roots.path),
            _ => None,
        }
    }

    pub fn client_cert_file(&self) -> Option<&Path> {
        match self {
            TlsPolicy::Verified { identity: Some(identity), .. } => Some(&identity.cert_path),
            _ => None,
        }
    }

    /// Build the reqwest client for this policy.
    pub fn build_client(&self, timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        match self {
            TlsPolicy::Default => {}
            TlsPolicy::Insecure => {
                builder = builder.danger_accept_invalid_certs(true);
            }
            TlsPolicy::Verified { roots, identity } => {
                if let Some(roots) = roots {
                    // a configured CA replaces the built-in trust store
                    builder = builder.tls_built_in_root_certs(false);
                    for certificate in &roots.certificates {
                        builder = builder.add_root_certificate(certificate.clone());
                    }
                }
                if let Some(identity) = identity {
                    builder = builder.identity(identity.identity.clone());
                }
            }
        }

        builder.build().map_err(|e| AuthError::TlsConfig {
            path: "<client>".to_owned(),
            reason: e.to_string(),
        })
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| AuthError::TlsConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_trust_roots(path: &Path) -> Result<TrustRoots> {
    let pem = read_file(path)?;
    let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| AuthError::TlsConfig {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if certificates.is_empty() {
        return Err(AuthError::TlsConfig {
            path: path.display().to_string(),
            reason: "no PEM certificates found".to_owned(),
        });
    }
    debug!(path = %path.display(), count = certificates.len(), "loaded ca certificates");
    Ok(TrustRoots {
        path: path.to_path_buf(),
        certificates,
    })
}

fn load_identity(cert_path: &Path, key_path: &Path) -> Result<ClientIdentity> {
    let mut pem = read_file(cert_path)?;
    pem.push(b'\n');
    pem.extend(read_file(key_path)?);
    let identity = Identity::from_pem(&pem).map_err(|e| AuthError::TlsConfig {
        path: format!("{} + {}", cert_path.display(), key_path.display()),
        reason: e.to_string(),
    })?;
    debug!(cert = %cert_path.display(), "loaded client identity");
    Ok(ClientIdentity {
        cert_path: cert_path.to_path_buf(),
        identity,
    })
}

/// Force an `https` scheme on the identity service url.
pub fn secure_scheme(url: &str) -> String {
    if url.starts_with("https") {
        return url.to_owned();
    }
    match url.strip_prefix("http") {
        Some(rest) => format!("https{}", rest),
        None => url.to_owned(),
    }
}
