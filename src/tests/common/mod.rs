// tests/common/mod.rs
pub use serde_json::json;

pub mod tls_keystone;
pub use tls_keystone::{tls_fixture, tls_fixture_str, TlsKeystone};

use chrono::{Duration, Utc};
use httpmock::MockServer;
use reqwest::{Method, Request, Url};
use serde_json::Value;

use crate::config::credentials::Credentials;

pub const STALE_ISSUED_AT: &str = "2000-01-01T00:00:00Z";
pub const STALE_EXPIRES_AT: &str = "2000-01-01T01:00:00Z";

/// (issued_at, expires_at) of a token issued a minute ago, valid for an hour.
pub fn fresh_window() -> (String, String) {
    let now = Utc::now();
    (
        (now - Duration::minutes(1)).to_rfc3339(),
        (now + Duration::hours(1)).to_rfc3339(),
    )
}

pub fn v2_body(id: &str, issued_at: &str, expires: &str) -> Value {
    json!({
        "access": {
            "token": {
                "id": id,
                "issued_at": issued_at,
                "expires": expires,
                "tenant": {"id": "7f3c", "name": "admin", "description": "admin tenant", "enabled": true}
            },
            "user": {"id": "u-1", "username": "admin"},
            "serviceCatalog": []
        }
    })
}

pub fn v3_body(issued_at: &str, expires_at: &str) -> Value {
    json!({
        "token": {
            "methods": ["password"],
            "issued_at": issued_at,
            "expires_at": expires_at,
            "project": {"name": "demo", "domain": {"name": "Default"}}
        }
    })
}

pub fn v2_credentials(server: &MockServer) -> Credentials {
    Credentials::v2(server.url("/v2.0"), "admin", "admin", "secret", None)
}

pub fn v3_credentials(server: &MockServer) -> Credentials {
    Credentials::v3(server.base_url(), "admin", "secret", "Default", "demo", "Default")
}

/// Outbound request to some protected API.
pub fn api_request() -> Request {
    let url = Url::parse("http://contrail-api:8082/virtual-networks").expect("valid url");
    Request::new(Method::GET, url)
}

pub fn auth_header(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("x-auth-token")
        .and_then(|value| value.to_str().ok())
}
