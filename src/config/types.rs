use serde::Deserialize;

use crate::config::credentials::Credentials;
use crate::config::settings::{SettingsConfig, TlsConfig};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub keystone: Credentials,
    pub tls: Option<TlsConfig>,
}

impl ServiceConfig {
    pub fn tls(&self) -> TlsConfig {
        self.tls.clone().unwrap_or_default()
    }
}
