use reqwest::Request;
use tracing::info;

use crate::cache::refresh_policy;
use crate::client::keystone_client::KeystoneClient;
use crate::client::AddAuthentication;
use crate::config::types::ServiceConfig;
use crate::error::Result;
use crate::observability::metrics::get_metrics;

/// Wraps a [`KeystoneClient`] and drops its token once past half-life, so
/// requests never go out with a token close to expiry.
#[derive(Debug)]
pub struct KeepaliveKeystoneClient {
    inner: KeystoneClient,
}

impl KeepaliveKeystoneClient {
    pub fn new(inner: KeystoneClient) -> Self {
        Self { inner }
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        KeystoneClient::from_config(config).map(Self::new)
    }

    pub fn inner(&self) -> &KeystoneClient {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut KeystoneClient {
        &mut self.inner
    }

    pub fn needs_refreshing(&self) -> Result<bool> {
        refresh_policy::needs_refresh(self.inner.state())
    }
}

impl AddAuthentication for KeepaliveKeystoneClient {
    async fn add_authentication(&mut self, request: &mut Request) -> Result<()> {
        if self.needs_refreshing()? && !self.inner.state().is_absent() {
            info!("cached token past half-life, re-authenticating");
            get_metrics().await.token_refreshes.inc();
            self.inner.invalidate();
        }
        self.inner.add_authentication(request).await
    }
}
