/// Transport module
///
/// Owns the reqwest client used for identity service calls together with the
/// TLS policy it was built from and the (possibly scheme-upgraded) auth url.

pub mod tls;

use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::error::Result;
use tls::{secure_scheme, TlsPolicy, TransportConfig};

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    auth_url: String,
    policy: TlsPolicy,
    timeout: Option<Duration>,
}

impl Transport {
    pub fn new(auth_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let policy = TlsPolicy::Default;
        let client = policy.build_client(timeout)?;
        Ok(Self {
            client,
            auth_url: auth_url.to_owned(),
            policy,
            timeout,
        })
    }

    /// Rebuild the client from `config` and upgrade the auth url to https.
    ///
    /// Nothing changes when the TLS material cannot be loaded.
    pub fn configure(&mut self, config: &TransportConfig) -> Result<()> {
        let policy = TlsPolicy::resolve(config)?;
        let client = policy.build_client(self.timeout)?;

        let auth_url = secure_scheme(&self.auth_url);
        if auth_url != self.auth_url {
            info!(from = %self.auth_url, to = %auth_url, "identity service url upgraded to https");
        }
        if policy.is_insecure() {
            warn!("tls certificate verification disabled for identity service");
        }

        self.client = client;
        self.policy = policy;
        self.auth_url = auth_url;
        Ok(())
    }

    /// Switch certificate verification off, keeping the auth url as is.
    pub fn force_insecure(&mut self) -> Result<()> {
        if self.policy.is_insecure() {
            return Ok(());
        }
        let policy = TlsPolicy::Insecure;
        self.client = policy.build_client(self.timeout)?;
        self.policy = policy;
        Ok(())
    }

    /// `<auth_url>/<suffix>` with exactly one slash in between.
    pub fn url(&self, suffix: &str) -> String {
        format!("{}/{}", self.auth_url.trim_end_matches('/'), suffix)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn policy(&self) -> &TlsPolicy {
        &self.policy
    }
}
