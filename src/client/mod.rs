/// Client module
///
/// Token injection into outbound requests: the lazy [`KeystoneClient`] and the
/// half-life refreshing [`KeepaliveKeystoneClient`] decorator.

use std::future::Future;

use http::{HeaderName, HeaderValue};
use reqwest::Request;

use crate::error::{AuthError, Result};

pub mod keepalive;
pub mod keystone_client;

pub use keepalive::KeepaliveKeystoneClient;
pub use keystone_client::KeystoneClient;

pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub trait AddAuthentication {
    /// Make sure a token is cached and set `X-Auth-Token` on `request`.
    fn add_authentication(&mut self, request: &mut Request) -> impl Future<Output = Result<()>> + Send;
}

pub(crate) fn set_auth_header(request: &mut Request, token_id: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(token_id).map_err(|e| AuthError::InvalidHeader(e.to_string()))?;
    value.set_sensitive(true);
    request
        .headers_mut()
        .insert(HeaderName::from_static(AUTH_TOKEN_HEADER), value);
    Ok(())
}
