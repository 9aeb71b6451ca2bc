
/// Bearer token issued by the identity service.
///
/// Timestamps are kept exactly as the service returned them (RFC 3339);
/// they are parsed when the refresh policy is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub issued_at: String,
    pub expires_at: String,
}

impl Token {
    pub fn new(id: impl Into<String>, issued_at: impl Into<String>, expires_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            issued_at: issued_at.into(),
            expires_at: expires_at.into(),
        }
    }
}
