//! Integration tests for the ID token exchange
//!
//! Verifies that IdentityClient::sign_in_with_idp() correctly builds the
//! request, parses the response, and that CloudIdentityProvider tracks
//! the resulting session across sign-in and sign-out.

use lnxauth_core::ports::IIdentityProvider;
use lnxauth_identity::client::IdentityClient;
use lnxauth_identity::provider::CloudIdentityProvider;

use crate::common;

#[tokio::test]
async fn test_sign_in_returns_profile() {
    let (_server, client) = common::setup_identity_mock().await;

    let session = client
        .sign_in_with_idp("google-id-token")
        .await
        .expect("sign_in_with_idp failed");

    assert_eq!(session.user_id, "user-test-001");
    assert_eq!(session.display_name.as_deref(), Some("Test User"));
    assert_eq!(session.email.as_deref(), Some("test@example.com"));
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_sign_in_tolerates_sparse_profile() {
    let server = wiremock::MockServer::start().await;
    common::mount_sign_in_sparse(&server).await;
    let client = IdentityClient::with_base_url(common::TEST_API_KEY, server.uri());

    let session = client
        .sign_in_with_idp("google-id-token")
        .await
        .expect("sign_in_with_idp failed");

    assert_eq!(session.user_id, "user-sparse-001");
    assert_eq!(session.display_name, None);
    assert_eq!(session.email, None);
}

#[tokio::test]
async fn test_sign_in_surfaces_api_error() {
    let server = wiremock::MockServer::start().await;
    common::mount_sign_in_error(&server, 400, "INVALID_IDP_RESPONSE").await;
    let client = IdentityClient::with_base_url(common::TEST_API_KEY, server.uri());

    let err = client
        .sign_in_with_idp("bad-token")
        .await
        .expect_err("expected sign-in to fail");

    assert!(err.to_string().contains("INVALID_IDP_RESPONSE"));
}

#[tokio::test]
async fn test_sign_in_rejects_missing_local_id() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/accounts:signInWithIdp"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "expiresIn": "3600" })),
        )
        .mount(&server)
        .await;
    let client = IdentityClient::with_base_url(common::TEST_API_KEY, server.uri());

    let err = client
        .sign_in_with_idp("google-id-token")
        .await
        .expect_err("expected sign-in to fail");

    assert!(err.to_string().contains("localId"));
}

#[tokio::test]
async fn test_provider_tracks_session_lifecycle() {
    let (_server, client) = common::setup_identity_mock().await;
    let provider = CloudIdentityProvider::new(client);

    assert!(provider.current_session().await.is_none());

    let session = provider
        .sign_in_with_id_token("google-id-token")
        .await
        .expect("sign-in failed");
    assert_eq!(session.user_id, "user-test-001");

    let current = provider.current_session().await.expect("session missing");
    assert_eq!(current.user_id, "user-test-001");

    provider.sign_out().await.expect("sign-out failed");
    assert!(provider.current_session().await.is_none());
}

#[tokio::test]
async fn test_provider_sign_out_is_idempotent() {
    let (_server, client) = common::setup_identity_mock().await;
    let provider = CloudIdentityProvider::new(client);

    provider.sign_out().await.expect("first sign-out failed");
    provider.sign_out().await.expect("second sign-out failed");

    assert!(provider.current_session().await.is_none());
}
