use std::time::Duration;

use reqwest::Request;
use tracing::debug;

use crate::cache::token::Token;
use crate::cache::token_state::TokenState;
use crate::client::{set_auth_header, AddAuthentication};
use crate::config::credentials::Credentials;
use crate::config::types::ServiceConfig;
use crate::error::{AuthError, Result};
use crate::sources::Authenticator;
use crate::transport::tls::TransportConfig;
use crate::transport::Transport;

/// Keystone client that authenticates lazily: only when no token is cached.
///
/// Expired tokens are not detected here; callers seeing a `401` from the
/// protected API call [`KeystoneClient::invalidate`].
#[derive(Debug)]
pub struct KeystoneClient {
    authenticator: Authenticator,
    state: TokenState,
}

impl KeystoneClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let transport = Transport::new(&credentials.auth_url, None)?;
        Ok(Self::with_authenticator(Authenticator::new(credentials, transport)))
    }

    pub fn with_authenticator(authenticator: Authenticator) -> Self {
        Self {
            authenticator,
            state: TokenState::new(),
        }
    }

    /// Build from a loaded config; the `tls` section, when present, is
    /// applied as if passed to [`KeystoneClient::configure_transport`].
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let timeout = config
            .settings
            .http
            .as_ref()
            .and_then(|http| http.timeout_ms)
            .map(Duration::from_millis);
        let tls = config.tls();

        let transport = Transport::new(&config.keystone.auth_url, timeout)?;
        let authenticator = Authenticator::new(config.keystone.clone(), transport)
            .with_force_insecure_v3(tls.force_insecure_v3);

        let mut client = Self::with_authenticator(authenticator);
        if config.tls.is_some() {
            client.configure_transport(&tls.transport)?;
        }
        Ok(client)
    }

    /// Set up TLS towards the identity service. Empty paths mean "not set".
    pub fn add_encryption(&mut self, ca_file: &str, key_file: &str, cert_file: &str, insecure: bool) -> Result<()> {
        self.configure_transport(&TransportConfig::new(ca_file, key_file, cert_file, insecure))
    }

    pub fn configure_transport(&mut self, config: &TransportConfig) -> Result<()> {
        self.authenticator.transport_mut().configure(config)
    }

    /// Run an exchange and replace the cached token. On failure the cache
    /// keeps whatever it held before.
    pub async fn authenticate(&mut self) -> Result<()> {
        let token = self.authenticator.authenticate().await?;
        self.state.replace(token, self.authenticator.protocol());
        Ok(())
    }

    pub fn invalidate(&mut self) {
        debug!("cached token discarded");
        self.state.clear();
    }

    pub fn token(&self) -> Option<&Token> {
        self.state.token()
    }

    pub fn state(&self) -> &TokenState {
        &self.state
    }

    pub fn transport(&self) -> &Transport {
        self.authenticator.transport()
    }

    pub fn credentials(&self) -> &Credentials {
        self.authenticator.credentials()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TokenState {
        &mut self.state
    }
}

impl AddAuthentication for KeystoneClient {
    async fn add_authentication(&mut self, request: &mut Request) -> Result<()> {
        if self.state.is_absent() {
            self.authenticate().await?;
        }
        let token = self
            .state
            .token()
            .ok_or_else(|| AuthError::InvalidResponse("no token cached after authentication".to_owned()))?;
        set_auth_header(request, &token.id)
    }
}
