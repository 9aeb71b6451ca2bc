use serde::Deserialize;

use crate::transport::tls::TransportConfig;

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub logging: Option<LoggingConfig>,
    pub http: Option<HttpConfig>,
    /// keepalive client refreshes tokens at half-life,
    /// the base client only when no token is cached
    #[serde(default = "default_keepalive")]
    pub keepalive: bool,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            logging: None,
            http: None,
            keepalive: default_keepalive(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HttpConfig {
    /// request timeout for identity service calls,
    /// reqwest default (none) when absent
    pub timeout_ms: Option<u64>,
}

/// ================================
/// TLS towards the identity service
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct TlsConfig {
    #[serde(flatten)]
    pub transport: TransportConfig,
    /// v3 exchanges switch certificate verification off before every request
    #[serde(default = "default_force_insecure_v3")]
    pub force_insecure_v3: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            force_insecure_v3: default_force_insecure_v3(),
        }
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new (level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_keepalive() -> bool {
    true
}

fn default_force_insecure_v3() -> bool {
    true
}
