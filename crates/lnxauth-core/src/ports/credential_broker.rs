//! Credential broker port (driven/secondary port)
//!
//! This module defines the interface to the external service that brokers
//! a sign-in credential from the user. The primary implementation runs an
//! interactive Google OAuth2 flow, but the trait is credential-agnostic:
//! the broker returns an opaque credential with a kind tag, and the use
//! case recognizes exactly one kind.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific (browser launch, user cancellation, HTTP) and don't
//!   need domain-level classification.
//! - The credential payload is an opaque JSON value; extracting the ID
//!   token from it is a domain concern (the original payload format is
//!   owned by the broker) and lives on [`Credential`].

use serde::{Deserialize, Serialize};

use crate::domain::errors::AuthError;

/// Parameters for a credential request
///
/// Mirrors the broker's request surface: new accounts are always allowed
/// (no stored-account filter) and the server client id identifies the
/// backend the resulting token must be minted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    /// OAuth client id of the backend consuming the ID token
    pub server_client_id: String,
    /// Whether accounts not previously used on this device may be offered
    pub allow_new_accounts: bool,
}

impl CredentialRequest {
    /// Creates a request with no stored-account filter
    pub fn new(server_client_id: impl Into<String>) -> Self {
        Self {
            server_client_id: server_client_id.into(),
            allow_new_accounts: true,
        }
    }
}

/// Kind tag of a brokered credential
///
/// This system recognizes exactly one kind; everything else is surfaced
/// to the user as an error without touching the session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// A Google ID token credential
    GoogleIdToken,
    /// Any kind this system does not handle; carries the broker's raw tag
    Unrecognized(String),
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialKind::GoogleIdToken => write!(f, "google_id_token"),
            CredentialKind::Unrecognized(tag) => write!(f, "{}", tag),
        }
    }
}

/// An opaque credential returned by the broker
///
/// The payload layout is owned by the broker; this system only knows how
/// to read the ID token out of the recognized kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Kind tag used to decide whether the payload is understood
    kind: CredentialKind,
    /// Opaque broker payload
    data: serde_json::Value,
}

impl Credential {
    /// Creates a credential from a kind tag and raw payload
    pub fn new(kind: CredentialKind, data: serde_json::Value) -> Self {
        Self { kind, data }
    }

    /// Convenience constructor for the recognized kind
    pub fn google(id_token: impl Into<String>) -> Self {
        Self {
            kind: CredentialKind::GoogleIdToken,
            data: serde_json::json!({ "id_token": id_token.into() }),
        }
    }

    /// Returns the credential's kind tag
    pub fn kind(&self) -> &CredentialKind {
        &self.kind
    }

    /// Extracts the Google ID token from the payload
    ///
    /// # Errors
    /// - `AuthError::UnexpectedCredentialType` if the kind tag is not
    ///   [`CredentialKind::GoogleIdToken`]
    /// - `AuthError::TokenParse` if the payload lacks a non-empty
    ///   `id_token` string
    pub fn google_id_token(&self) -> Result<String, AuthError> {
        match &self.kind {
            CredentialKind::GoogleIdToken => {}
            other => return Err(AuthError::UnexpectedCredentialType(other.to_string())),
        }

        match self.data.get("id_token").and_then(|v| v.as_str()) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            Some(_) => Err(AuthError::TokenParse("empty id_token field".to_string())),
            None => Err(AuthError::TokenParse("missing id_token field".to_string())),
        }
    }
}

/// Port trait for interactive credential acquisition
///
/// ## Implementation Notes
///
/// - `get_credential` blocks (asynchronously) until the user completes or
///   abandons the interactive flow; implementations rely on the underlying
///   SDK's own timeouts rather than applying their own.
/// - User cancellation is an ordinary error, not a panic.
#[async_trait::async_trait]
pub trait ICredentialBroker: Send + Sync {
    /// Requests one credential from the broker
    ///
    /// # Arguments
    /// * `request` - Account filtering and client id parameters
    ///
    /// # Returns
    /// Exactly one credential with a kind tag; the caller decides whether
    /// the kind is recognized.
    async fn get_credential(&self, request: &CredentialRequest) -> anyhow::Result<Credential>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_allows_new_accounts() {
        let request = CredentialRequest::new("client-123");
        assert_eq!(request.server_client_id, "client-123");
        assert!(request.allow_new_accounts);
    }

    #[test]
    fn test_google_credential_roundtrip() {
        let credential = Credential::google("token-abc");
        assert_eq!(*credential.kind(), CredentialKind::GoogleIdToken);
        assert_eq!(credential.google_id_token().unwrap(), "token-abc");
    }

    #[test]
    fn test_unrecognized_kind_rejected() {
        let credential = Credential::new(
            CredentialKind::Unrecognized("passkey".to_string()),
            serde_json::json!({}),
        );
        let err = credential.google_id_token().unwrap_err();
        assert_eq!(
            err,
            AuthError::UnexpectedCredentialType("passkey".to_string())
        );
    }

    #[test]
    fn test_missing_id_token_is_parse_error() {
        let credential = Credential::new(
            CredentialKind::GoogleIdToken,
            serde_json::json!({ "something_else": true }),
        );
        assert!(matches!(
            credential.google_id_token(),
            Err(AuthError::TokenParse(_))
        ));
    }

    #[test]
    fn test_empty_id_token_is_parse_error() {
        let credential = Credential::new(
            CredentialKind::GoogleIdToken,
            serde_json::json!({ "id_token": "" }),
        );
        assert!(matches!(
            credential.google_id_token(),
            Err(AuthError::TokenParse(_))
        ));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(CredentialKind::GoogleIdToken.to_string(), "google_id_token");
        assert_eq!(
            CredentialKind::Unrecognized("smart_card".to_string()).to_string(),
            "smart_card"
        );
    }
}
