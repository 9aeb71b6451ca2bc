use std::fmt;

use serde::{Deserialize, Serialize};

/// ================================
/// Keystone protocol family
/// ================================
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    #[default]
    V2,
    V3,
}

impl ProtocolVersion {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ProtocolVersion::V2 => "v2",
            ProtocolVersion::V3 => "v3",
        }
    }
}

/// ================================
/// Identity service credentials
/// ================================
///
/// Immutable once built. `tenant_name` is used by the v2 password exchange,
/// `project_name` + `project_domain_name` scope the v3 token.
#[derive(Deserialize, Clone, Default)]
pub struct Credentials {
    pub auth_url: String,
    #[serde(default)]
    pub protocol: ProtocolVersion,
    #[serde(default)]
    pub tenant_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub admin_token: Option<String>,
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub project_domain_name: String,
}

impl Credentials {
    /// v2 credentials. An admin token, when present and non-empty, takes
    /// precedence over username/password.
    pub fn v2(
        auth_url: impl Into<String>,
        tenant_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        admin_token: Option<String>,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            protocol: ProtocolVersion::V2,
            tenant_name: tenant_name.into(),
            username: username.into(),
            password: password.into(),
            admin_token,
            ..Default::default()
        }
    }

    /// v3 password credentials scoped to a project.
    pub fn v3(
        auth_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        domain_name: impl Into<String>,
        project_name: impl Into<String>,
        project_domain_name: impl Into<String>,
    ) -> Self {
        Self {
            auth_url: auth_url.into(),
            protocol: ProtocolVersion::V3,
            username: username.into(),
            password: password.into(),
            domain_name: domain_name.into(),
            project_name: project_name.into(),
            project_domain_name: project_domain_name.into(),
            ..Default::default()
        }
    }

    /// Admin token, if configured and non-empty.
    pub fn admin_token(&self) -> Option<&str> {
        self.admin_token.as_deref().filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_url", &self.auth_url)
            .field("protocol", &self.protocol)
            .field("tenant_name", &self.tenant_name)
            .field("project_name", &self.project_name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("admin_token", &self.admin_token().map(|_| "[REDACTED]"))
            .field("domain_name", &self.domain_name)
            .field("project_domain_name", &self.project_domain_name)
            .finish()
    }
}
