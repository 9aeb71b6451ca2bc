use crate::cache::token::Token;
use crate::config::credentials::ProtocolVersion;

/// The single token cached by a client, plus the protocol family that issued it.
///
/// Re-authentication replaces the whole state; fields are never patched.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    current: Option<(Token, ProtocolVersion)>,
}

impl TokenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&Token> {
        self.current.as_ref().map(|(token, _)| token)
    }

    pub fn protocol(&self) -> Option<ProtocolVersion> {
        self.current.as_ref().map(|(_, protocol)| *protocol)
    }

    pub fn is_absent(&self) -> bool {
        self.current.is_none()
    }

    pub fn replace(&mut self, token: Token, protocol: ProtocolVersion) {
        self.current = Some((token, protocol));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
