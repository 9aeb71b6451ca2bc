use http::{HeaderMap, StatusCode};

use crate::cache::token::Token;
use crate::error::{AuthError, Result};
use crate::sources::exchange::{decode, post_json, required};
use crate::sources::schema::{
    NameRef, V3Auth, V3Identity, V3Password, V3PasswordRequest, V3Project, V3Scope, V3TokenResponse,
    V3User,
};
use crate::sources::Authenticate;
use crate::transport::Transport;

const AUTH_TOKENS_PATH: &str = "v3/auth/tokens";
const ACCEPTED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
pub const SUBJECT_TOKEN_HEADER: &str = "X-Subject-Token";
const PASSWORD_METHOD: &str = "password";

/// v3 password exchange, scoped to a project.
#[derive(Debug, Clone, Copy)]
pub struct PasswordV3<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub domain_name: &'a str,
    pub project_name: &'a str,
    pub project_domain_name: &'a str,
}

impl PasswordV3<'_> {
    pub fn request(&self) -> V3PasswordRequest<'_> {
        V3PasswordRequest {
            auth: V3Auth {
                identity: V3Identity {
                    methods: vec![PASSWORD_METHOD],
                    password: V3Password {
                        user: V3User {
                            domain: NameRef { name: self.domain_name },
                            name: self.username,
                            password: self.password,
                        },
                    },
                },
                scope: V3Scope {
                    project: V3Project {
                        name: self.project_name,
                        domain: NameRef { name: self.project_domain_name },
                    },
                },
            },
        }
    }
}

impl Authenticate for PasswordV3<'_> {
    async fn authenticate(&self, transport: &Transport) -> Result<Token> {
        let url = transport.url(AUTH_TOKENS_PATH);
        let response = post_json(transport, &url, &self.request(), ACCEPTED).await?;
        token_from_response(&response.headers, &response.body)
    }
}

/// v3 puts the id in the `X-Subject-Token` header and only the validity
/// window in the body.
fn token_from_response(headers: &HeaderMap, body: &str) -> Result<Token> {
    let response: V3TokenResponse = decode(body)?;
    let id = headers
        .get(SUBJECT_TOKEN_HEADER)
        .map(|value| {
            value
                .to_str()
                .map(str::to_owned)
                .map_err(|_| AuthError::InvalidResponse(format!("invalid {} header", SUBJECT_TOKEN_HEADER)))
        })
        .transpose()?;

    Ok(Token::new(
        required(id, SUBJECT_TOKEN_HEADER)?,
        required(response.token.issued_at, "token.issued_at")?,
        required(response.token.expires_at, "token.expires_at")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderName, HeaderValue};
    use serde_json::json;

    #[test]
    fn request_shape() {
        let strategy = PasswordV3 {
            username: "admin",
            password: "secret",
            domain_name: "Default",
            project_name: "demo",
            project_domain_name: "ProjDomain",
        };
        assert_eq!(
            serde_json::to_value(strategy.request()).unwrap(),
            json!({"auth": {
                "identity": {
                    "methods": ["password"],
                    "password": {"user": {"domain": {"name": "Default"}, "name": "admin", "password": "secret"}}
                },
                "scope": {"project": {"name": "demo", "domain": {"name": "ProjDomain"}}}
            }})
        );
    }

    #[test]
    fn id_never_comes_from_the_body() {
        let body = json!({"token": {
            "id": "from-body",
            "issued_at": "2024-01-01T00:00:00.000000Z",
            "expires_at": "2024-01-01T01:00:00.000000Z"
        }})
        .to_string();

        let err = token_from_response(&HeaderMap::new(), &body).unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(msg) if msg.contains(SUBJECT_TOKEN_HEADER)));

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-subject-token"), HeaderValue::from_static("from-header"));
        let token = token_from_response(&headers, &body).unwrap();
        assert_eq!(token.id, "from-header");
        assert_eq!(token.issued_at, "2024-01-01T00:00:00.000000Z");
    }
}
