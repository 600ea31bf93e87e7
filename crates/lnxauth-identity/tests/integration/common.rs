//! Shared test helpers for identity integration tests
//!
//! Provides wiremock-based mock server setup for the Identity Toolkit
//! endpoints. Each helper mounts the necessary mock endpoints and returns
//! a configured IdentityClient pointing at the mock server.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lnxauth_identity::client::IdentityClient;

/// API key used by all mock-backed tests
pub const TEST_API_KEY: &str = "test-api-key";

/// Sets up a mock server whose sign-in endpoint returns a complete
/// profile, and returns a (MockServer, IdentityClient) tuple.
pub async fn setup_identity_mock() -> (MockServer, IdentityClient) {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithIdp"))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "user-test-001",
            "displayName": "Test User",
            "email": "test@example.com",
            "idToken": "provider-session-token",
            "refreshToken": "provider-refresh-token",
            "expiresIn": "3600"
        })))
        .mount(&server)
        .await;

    let client = IdentityClient::with_base_url(TEST_API_KEY, server.uri());

    (server, client)
}

/// Mounts a sign-in endpoint that fails with the given status and
/// Identity Toolkit error message.
pub async fn mount_sign_in_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithIdp"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "error": {
                "code": status,
                "message": message
            }
        })))
        .mount(server)
        .await;
}

/// Mounts a sign-in endpoint that returns a sparse profile (no name,
/// no email).
pub async fn mount_sign_in_sparse(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/accounts:signInWithIdp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "user-sparse-001",
            "expiresIn": "3600"
        })))
        .mount(server)
        .await;
}
