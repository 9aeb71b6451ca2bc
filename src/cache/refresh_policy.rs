use chrono::{DateTime, Utc};

use crate::cache::token::Token;
use crate::cache::token_state::TokenState;
use crate::error::Result;
use crate::helpers::time::{now_utc, parse_rfc3339};

/// Point in time after which `token` should be replaced: half way between
/// issue and expiry.
pub fn refresh_deadline(token: &Token) -> Result<DateTime<Utc>> {
    let issued_at = parse_rfc3339(&token.issued_at)?;
    let expires_at = parse_rfc3339(&token.expires_at)?;
    Ok(issued_at + (expires_at - issued_at) / 2)
}

/// Check if the cached token should be discarded
pub fn needs_refresh(state: &TokenState) -> Result<bool> {
    needs_refresh_at(state, now_utc())
}

pub fn needs_refresh_at(state: &TokenState, now: DateTime<Utc>) -> Result<bool> {
    match state.token() {
        None => Ok(true),
        Some(token) => Ok(now > refresh_deadline(token)?),
    }
}
