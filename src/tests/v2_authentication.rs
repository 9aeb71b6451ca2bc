#[cfg(test)]
mod test {
    use httpmock::Method::POST;
    use httpmock::MockServer;

    use crate::cache::token::Token;
    use crate::client::KeystoneClient;
    use crate::config::credentials::{Credentials, ProtocolVersion};
    use crate::error::AuthError;
    use crate::observability::metrics::get_metrics;
    use crate::tests::common::*;

    #[tokio::test]
    async fn password_exchange_reads_token_from_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2.0/tokens")
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "auth": {
                            "tenantName": "admin",
                            "passwordCredentials": {"username": "admin", "password": "secret"}
                        }
                    }));
                then.status(200).json_body(json!({
                    "access": {"token": {
                        "Id": "abc",
                        "Issued_At": "2024-01-01T00:00:00Z",
                        "Expires": "2024-01-01T01:00:00Z"
                    }}
                }));
            })
            .await;

        let mut client = KeystoneClient::new(v2_credentials(&server)).unwrap();
        client.authenticate().await.unwrap();

        mock.assert_calls_async(1).await;
        assert_eq!(
            client.token(),
            Some(&Token::new("abc", "2024-01-01T00:00:00Z", "2024-01-01T01:00:00Z"))
        );
        assert_eq!(client.state().protocol(), Some(ProtocolVersion::V2));
    }

    #[tokio::test]
    async fn admin_token_exchange_and_trailing_slash() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v2.0/tokens")
                    .json_body(json!({"auth": {"token": {"id": "ADMIN-TOKEN"}}}));
                then.status(200)
                    .json_body(v2_body("exchanged", "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"));
            })
            .await;

        let credentials = Credentials::v2(server.url("/v2.0/"), "admin", "", "", Some("ADMIN-TOKEN".into()));
        let mut client = KeystoneClient::new(credentials).unwrap();
        client.authenticate().await.unwrap();

        mock.assert_calls_async(1).await;
        assert_eq!(client.token().map(|t| t.id.as_str()), Some("exchanged"));
    }

    #[tokio::test]
    async fn rejection_keeps_previous_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2.0/tokens");
                then.status(401)
                    .body(r#"{"error": {"message": "The request you have made requires authentication.", "code": 401}}"#);
            })
            .await;

        let failures_before = get_metrics()
            .await
            .auth_failures
            .with_label_values(&["v2", "protocol"])
            .get();

        let mut client = KeystoneClient::new(v2_credentials(&server)).unwrap();
        let previous = Token::new("previous", "2024-01-01T00:00:00Z", "2024-01-01T01:00:00Z");
        client.state_mut().replace(previous.clone(), ProtocolVersion::V2);

        let err = client.authenticate().await.unwrap_err();
        match err {
            AuthError::Protocol { status, body } => {
                assert_eq!(status, "401 Unauthorized");
                assert_eq!(
                    body,
                    r#"{"error": {"message": "The request you have made requires authentication.", "code": 401}}"#
                );
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
        assert_eq!(client.token(), Some(&previous));

        let failures_after = get_metrics()
            .await
            .auth_failures
            .with_label_values(&["v2", "protocol"])
            .get();
        assert!(failures_after > failures_before);
    }

    #[tokio::test]
    async fn created_is_not_success_for_v2() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2.0/tokens");
                then.status(201)
                    .json_body(v2_body("abc", "2024-01-01T00:00:00Z", "2024-01-01T01:00:00Z"));
            })
            .await;

        let mut client = KeystoneClient::new(v2_credentials(&server)).unwrap();
        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::Protocol { ref status, .. } if status == "201 Created"));
        assert!(client.state().is_absent());
    }

    #[tokio::test]
    async fn success_without_token_id_is_invalid() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v2.0/tokens");
                then.status(200).json_body(json!({"access": {"token": {
                    "issued_at": "2024-01-01T00:00:00Z",
                    "expires": "2024-01-01T01:00:00Z"
                }}}));
            })
            .await;

        let mut client = KeystoneClient::new(v2_credentials(&server)).unwrap();
        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(_)));
        assert!(client.state().is_absent());
    }

    #[tokio::test]
    async fn unreachable_identity_service_is_a_network_error() {
        let credentials = Credentials::v2("http://127.0.0.1:1/v2.0", "admin", "admin", "secret", None);
        let mut client = KeystoneClient::new(credentials).unwrap();
        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)), "{err:?}");
    }
}
