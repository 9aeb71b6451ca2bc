use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::error::{AuthError, Result};

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

/// Parse an RFC 3339 timestamp as returned by keystone, normalized to UTC.
pub fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| AuthError::TimeParse {
            value: value.to_owned(),
            source,
        })
}
