use http::StatusCode;
use tracing::debug;

use crate::cache::token::Token;
use crate::error::Result;
use crate::sources::exchange::{decode, post_json, required};
use crate::sources::schema::{
    IdRef, PasswordCredentials, V2PasswordAuth, V2PasswordRequest, V2TokenAuth, V2TokenRequest,
    V2TokenResponse,
};
use crate::sources::Authenticate;
use crate::transport::Transport;

const TOKENS_PATH: &str = "tokens";
const ACCEPTED: &[StatusCode] = &[StatusCode::OK];

/// v2 exchange of a pre-issued admin token for a fresh one.
#[derive(Debug, Clone, Copy)]
pub struct TokenExchangeV2<'a> {
    pub admin_token: &'a str,
}

/// v2 tenant-scoped username/password exchange.
#[derive(Debug, Clone, Copy)]
pub struct PasswordV2<'a> {
    pub tenant_name: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

impl TokenExchangeV2<'_> {
    pub fn request(&self) -> V2TokenRequest<'_> {
        V2TokenRequest {
            auth: V2TokenAuth {
                token: IdRef { id: self.admin_token },
            },
        }
    }
}

impl PasswordV2<'_> {
    pub fn request(&self) -> V2PasswordRequest<'_> {
        V2PasswordRequest {
            auth: V2PasswordAuth {
                tenant_name: self.tenant_name,
                password_credentials: PasswordCredentials {
                    username: self.username,
                    password: self.password,
                },
            },
        }
    }
}

impl Authenticate for TokenExchangeV2<'_> {
    async fn authenticate(&self, transport: &Transport) -> Result<Token> {
        let url = transport.url(TOKENS_PATH);
        let response = post_json(transport, &url, &self.request(), ACCEPTED).await?;
        token_from_body(&response.body)
    }
}

impl Authenticate for PasswordV2<'_> {
    async fn authenticate(&self, transport: &Transport) -> Result<Token> {
        let url = transport.url(TOKENS_PATH);
        let response = post_json(transport, &url, &self.request(), ACCEPTED).await?;
        token_from_body(&response.body)
    }
}

/// v2 carries id, issue and expiry time in the body.
fn token_from_body(body: &str) -> Result<Token> {
    let response: V2TokenResponse = decode(body)?;
    let access = response.access;

    if let Some(tenant) = &access.token.tenant {
        debug!(tenant_id = ?tenant.id, tenant = ?tenant.name, enabled = ?tenant.enabled, "token scoped to tenant");
    }
    if let Some(user) = &access.user {
        debug!(user_id = ?user.id, username = ?user.username, "token issued for user");
    }

    Ok(Token::new(
        required(access.token.id, "access.token.id")?,
        required(access.token.issued_at, "access.token.issued_at")?,
        required(access.token.expires, "access.token.expires")?,
    ))
}
