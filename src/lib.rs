//! # Keystone Token Provider Library
//!
//! Obtains a bearer token from an OpenStack Keystone identity service
//! (v2 token/password or v3 password exchange), caches it, drops it at
//! half-life and injects it into outbound requests as `X-Auth-Token`.
//!
//! Modules:
//! - `config`: credentials, settings and YAML loading/validation
//! - `transport`: TLS policy and the HTTP client used towards keystone
//! - `sources`: the authentication strategies and `Authenticator`
//! - `cache`: cached token state and the refresh policy
//! - `client`: lazy and keepalive clients decorating outbound requests

pub mod config;
pub mod cache;
pub mod client;
pub mod error;
pub mod sources;
pub mod transport;
pub mod observability;
pub mod helpers;
pub mod utils;
pub mod tests;


pub use crate::cache::token::Token;
pub use crate::client::{AddAuthentication, KeepaliveKeystoneClient, KeystoneClient};
pub use crate::config::credentials::{Credentials, ProtocolVersion};
pub use crate::error::AuthError;
