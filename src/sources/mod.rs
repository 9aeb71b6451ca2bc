/// Sources module
///
/// Keystone authentication strategies and the `Authenticator` that runs the
/// one selected by its credentials.

use std::future::Future;

use tracing::{info, warn};

use crate::cache::token::Token;
use crate::config::credentials::{Credentials, ProtocolVersion};
use crate::error::Result;
use crate::helpers::time::{get_instant, parse_rfc3339};
use crate::observability::metrics::get_metrics;
use crate::transport::Transport;

pub mod exchange;
pub mod keystone_v2;
pub mod keystone_v3;
pub mod schema;

use keystone_v2::{PasswordV2, TokenExchangeV2};
use keystone_v3::PasswordV3;

pub trait Authenticate {
    /// Run one exchange against the identity service.
    fn authenticate(&self, transport: &Transport) -> impl Future<Output = Result<Token>> + Send;
}

#[derive(Debug, Clone, Copy)]
pub enum AuthStrategy<'a> {
    V2Token(TokenExchangeV2<'a>),
    V2Password(PasswordV2<'a>),
    V3Password(PasswordV3<'a>),
}

impl<'a> AuthStrategy<'a> {
    pub fn from_credentials(credentials: &'a Credentials) -> Self {
        match credentials.protocol {
            ProtocolVersion::V3 => AuthStrategy::V3Password(PasswordV3 {
                username: &credentials.username,
                password: &credentials.password,
                domain_name: &credentials.domain_name,
                project_name: &credentials.project_name,
                project_domain_name: &credentials.project_domain_name,
            }),
            ProtocolVersion::V2 => match credentials.admin_token() {
                Some(admin_token) => AuthStrategy::V2Token(TokenExchangeV2 { admin_token }),
                None => AuthStrategy::V2Password(PasswordV2 {
                    tenant_name: &credentials.tenant_name,
                    username: &credentials.username,
                    password: &credentials.password,
                }),
            },
        }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        match self {
            AuthStrategy::V2Token(_) | AuthStrategy::V2Password(_) => ProtocolVersion::V2,
            AuthStrategy::V3Password(_) => ProtocolVersion::V3,
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            AuthStrategy::V2Token(_) => "token",
            AuthStrategy::V2Password(_) | AuthStrategy::V3Password(_) => "password",
        }
    }
}

impl Authenticate for AuthStrategy<'_> {
    async fn authenticate(&self, transport: &Transport) -> Result<Token> {
        match self {
            AuthStrategy::V2Token(s) => s.authenticate(transport).await,
            AuthStrategy::V2Password(s) => s.authenticate(transport).await,
            AuthStrategy::V3Password(s) => s.authenticate(transport).await,
        }
    }
}

/// Credentials plus the transport used to exchange them.
#[derive(Debug)]
pub struct Authenticator {
    credentials: Credentials,
    transport: Transport,
    force_insecure_v3: bool,
}

impl Authenticator {
    pub fn new(credentials: Credentials, transport: Transport) -> Self {
        Self {
            credentials,
            transport,
            force_insecure_v3: true,
        }
    }

    /// Whether v3 exchanges switch certificate verification off first.
    pub fn with_force_insecure_v3(mut self, enabled: bool) -> Self {
        self.force_insecure_v3 = enabled;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.credentials.protocol
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Obtain a new token with the configured strategy.
    pub async fn authenticate(&mut self) -> Result<Token> {
        let metrics = get_metrics().await;
        let strategy = AuthStrategy::from_credentials(&self.credentials);
        let protocol = strategy.protocol().as_str();

        if strategy.protocol() == ProtocolVersion::V3 && self.force_insecure_v3 {
            warn!(auth_url = %self.transport.auth_url(), "v3 authentication runs with tls certificate verification disabled");
            self.transport.force_insecure()?;
        }

        metrics.auth_requests.with_label_values(&[protocol, strategy.method()]).inc();
        let start = get_instant();
        let result = strategy.authenticate(&self.transport).await;
        metrics.auth_duration.with_label_values(&[protocol]).observe(start.elapsed().as_secs_f64());

        match &result {
            Ok(token) => {
                if let Ok(expires_at) = parse_rfc3339(&token.expires_at) {
                    metrics.token_expiry_unix.set(expires_at.timestamp());
                }
                info!(protocol, method = strategy.method(), expires_at = %token.expires_at, "authenticated against identity service");
            }
            Err(err) => {
                metrics.auth_failures.with_label_values(&[protocol, err.kind()]).inc();
                warn!(protocol, error = %err, "authentication failed");
            }
        }
        result
    }
}
