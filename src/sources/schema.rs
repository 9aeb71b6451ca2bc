//! Keystone wire schemas.
//!
//! Request shapes are fixed by the identity API. v2 response keys are
//! accepted both in keystone's lower-case spelling and capitalised.

use serde::{Deserialize, Serialize};

// =============================================================================
// v2 requests: POST <auth_url>/tokens
// =============================================================================

#[derive(Debug, Serialize)]
pub struct V2TokenRequest<'a> {
    pub auth: V2TokenAuth<'a>,
}

#[derive(Debug, Serialize)]
pub struct V2TokenAuth<'a> {
    pub token: IdRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct IdRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct V2PasswordRequest<'a> {
    pub auth: V2PasswordAuth<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V2PasswordAuth<'a> {
    pub tenant_name: &'a str,
    pub password_credentials: PasswordCredentials<'a>,
}

#[derive(Debug, Serialize)]
pub struct PasswordCredentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// =============================================================================
// v3 request: POST <auth_url>/v3/auth/tokens
// =============================================================================

#[derive(Debug, Serialize)]
pub struct V3PasswordRequest<'a> {
    pub auth: V3Auth<'a>,
}

#[derive(Debug, Serialize)]
pub struct V3Auth<'a> {
    pub identity: V3Identity<'a>,
    pub scope: V3Scope<'a>,
}

#[derive(Debug, Serialize)]
pub struct V3Identity<'a> {
    pub methods: Vec<&'a str>,
    pub password: V3Password<'a>,
}

#[derive(Debug, Serialize)]
pub struct V3Password<'a> {
    pub user: V3User<'a>,
}

#[derive(Debug, Serialize)]
pub struct V3User<'a> {
    pub domain: NameRef<'a>,
    pub name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct V3Scope<'a> {
    pub project: V3Project<'a>,
}

#[derive(Debug, Serialize)]
pub struct V3Project<'a> {
    pub name: &'a str,
    pub domain: NameRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct NameRef<'a> {
    pub name: &'a str,
}

// =============================================================================
// Responses
// =============================================================================

/// `{"access": {"token": {...}, "user": {...}}}`
#[derive(Debug, Deserialize)]
pub struct V2TokenResponse {
    #[serde(alias = "Access")]
    pub access: V2Access,
}

#[derive(Debug, Deserialize)]
pub struct V2Access {
    #[serde(alias = "Token")]
    pub token: V2Token,
    #[serde(default, alias = "User")]
    pub user: Option<V2User>,
}

#[derive(Debug, Deserialize)]
pub struct V2Token {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Issued_At")]
    pub issued_at: Option<String>,
    #[serde(default, alias = "Expires")]
    pub expires: Option<String>,
    #[serde(default, alias = "Tenant")]
    pub tenant: Option<V2Tenant>,
}

#[derive(Debug, Deserialize)]
pub struct V2Tenant {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default, alias = "Enabled")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct V2User {
    #[serde(default, alias = "Id")]
    pub id: Option<String>,
    #[serde(default, alias = "Username")]
    pub username: Option<String>,
}

/// `{"token": {"issued_at": ..., "expires_at": ...}}`; the id travels in
/// the `X-Subject-Token` header.
#[derive(Debug, Deserialize)]
pub struct V3TokenResponse {
    pub token: V3Token,
}

#[derive(Debug, Deserialize)]
pub struct V3Token {
    #[serde(default)]
    pub issued_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}
