use http::header::CONTENT_TYPE;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{AuthError, Result};
use crate::transport::Transport;

/// Successful identity service answer.
#[derive(Debug)]
pub struct ExchangeResponse {
    pub headers: HeaderMap,
    pub body: String,
}

/// POST `payload` as JSON to `url`; any status outside `accepted` is a
/// protocol error carrying the status line and body verbatim.
pub async fn post_json<T: Serialize>(
    transport: &Transport,
    url: &str,
    payload: &T,
    accepted: &[StatusCode],
) -> Result<ExchangeResponse> {
    let data = serde_json::to_vec(payload).map_err(AuthError::Marshal)?;

    debug!(url = %url, "sending authentication request");
    let response = transport
        .client()
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(data)
        .send()
        .await?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await?;

    if !accepted.contains(&status) {
        return Err(AuthError::Protocol {
            status: status.to_string(),
            body,
        });
    }

    Ok(ExchangeResponse { headers, body })
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(format!("undecodable token response: {}", e)))
}

/// Reject missing or empty response fields so a token is never half built.
pub fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::InvalidResponse(format!("'{}' missing from token response", field)))
}
