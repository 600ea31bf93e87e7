//! Identity Toolkit HTTP client
//!
//! Provides a typed HTTP client for the Google Identity Toolkit
//! (`accounts:signInWithIdp`) endpoint, which exchanges a Google ID token
//! for a provider session. Handles endpoint construction, JSON
//! deserialization, and status-to-error mapping.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lnxauth_identity::client::IdentityClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = IdentityClient::new("api-key-here");
//! let session = client.sign_in_with_idp("google-id-token").await?;
//! println!("Hello, {}", session.display_name.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use lnxauth_core::ports::CloudSession;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::IdentityError;

/// Base URL for the Identity Toolkit API v1
const IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Session lifetime assumed when the response omits `expiresIn`
const DEFAULT_SESSION_LIFETIME_SECS: i64 = 3600;

// ============================================================================
// Identity Toolkit response types
// ============================================================================

/// Response from the accounts:signInWithIdp endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpResponse {
    /// Stable provider-side user ID
    local_id: Option<String>,
    /// User's display name, as known to the identity provider
    display_name: Option<String>,
    /// User's email address
    email: Option<String>,
    /// Session lifetime in seconds, as a decimal string
    expires_in: Option<String>,
}

/// Error envelope returned by the Identity Toolkit API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Error detail inside the envelope
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// IdentityClient
// ============================================================================

/// HTTP client for Identity Toolkit API calls
///
/// Wraps `reqwest::Client` with API-key query construction and base URL
/// handling for the `accounts:signInWithIdp` exchange.
pub struct IdentityClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// API key identifying the project
    api_key: String,
}

impl IdentityClient {
    /// Creates a new IdentityClient with the given API key
    ///
    /// # Arguments
    /// * `api_key` - The project API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: IDENTITY_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new IdentityClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `api_key` - The project API key
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Exchanges a Google ID token for a provider session
    ///
    /// Makes `POST /accounts:signInWithIdp` with the ID token wrapped in
    /// the `postBody` form the endpoint expects.
    ///
    /// # Arguments
    /// * `id_token` - A Google ID token (JWT) from the credential broker
    ///
    /// # Returns
    /// A [`CloudSession`] describing the signed-in user
    pub async fn sign_in_with_idp(&self, id_token: &str) -> Result<CloudSession> {
        let url = format!(
            "{}/accounts:signInWithIdp?key={}",
            self.base_url, self.api_key
        );
        debug!("Exchanging ID token at accounts:signInWithIdp");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "postBody": format!("id_token={}&providerId=google.com", id_token),
                "requestUri": "http://localhost",
                "returnIdpCredential": true,
                "returnSecureToken": true,
            }))
            .send()
            .await
            .context("Failed to send sign-in request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body).into());
        }

        let body: SignInWithIdpResponse = response
            .json()
            .await
            .context("Failed to parse sign-in response")?;

        let user_id = body
            .local_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| IdentityError::InvalidResponse("Missing localId".to_string()))?;

        let lifetime = body
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(DEFAULT_SESSION_LIFETIME_SECS);

        info!(user_id = %user_id, "Signed in with identity provider");

        Ok(CloudSession {
            user_id,
            display_name: body.display_name,
            email: body.email,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        })
    }
}

/// Maps an HTTP error status and response body to an [`IdentityError`]
fn classify_error(status: StatusCode, body: &str) -> IdentityError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::BAD_REQUEST => IdentityError::BadRequest(message),
        StatusCode::UNAUTHORIZED => IdentityError::Unauthorized(message),
        StatusCode::FORBIDDEN => IdentityError::Forbidden(message),
        status if status.is_server_error() => IdentityError::ServerError(message),
        _ => IdentityError::InvalidResponse(message),
    }
}
