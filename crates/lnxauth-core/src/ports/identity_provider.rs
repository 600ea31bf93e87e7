//! Cloud identity provider port (driven/secondary port)
//!
//! This module defines the interface to the external identity backend that
//! exchanges a third-party ID token for an application session. The
//! primary implementation targets an Identity-Toolkit-style REST API, but
//! the trait is provider-agnostic.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - Token issuance, refresh and revocation are owned by the provider;
//!   this system never persists provider tokens, only the display identity
//!   carried on [`CloudSession`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cloud session established by exchanging an ID token
///
/// Display name and email are optional on the provider side; consumers
/// default them to empty strings before persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudSession {
    /// Provider-specific user identifier
    pub user_id: String,
    /// User's display name, if the provider has one
    pub display_name: Option<String>,
    /// User's email address, if the provider has one
    pub email: Option<String>,
    /// When the provider-side session token expires
    pub expires_at: DateTime<Utc>,
}

impl CloudSession {
    /// Returns true if the provider-side session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Port trait for the cloud identity backend
///
/// ## Implementation Notes
///
/// - `sign_in_with_id_token` performs the network exchange and retains the
///   resulting session in adapter memory for the process lifetime.
/// - `sign_out` ends the local session only; it must be a harmless no-op
///   when no session exists.
#[async_trait::async_trait]
pub trait IIdentityProvider: Send + Sync {
    /// Exchanges a third-party ID token for a cloud session
    ///
    /// # Arguments
    /// * `id_token` - The ID token obtained from the credential broker
    ///
    /// # Returns
    /// The established session, including the display identity
    async fn sign_in_with_id_token(&self, id_token: &str) -> anyhow::Result<CloudSession>;

    /// Ends the local cloud session
    ///
    /// Idempotent: signing out with no active session succeeds.
    async fn sign_out(&self) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>) -> CloudSession {
        CloudSession {
            user_id: "user-1".to_string(),
            display_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            expires_at,
        }
    }

    #[test]
    fn test_fresh_session_not_expired() {
        let s = session(Utc::now() + Duration::hours(1));
        assert!(!s.is_expired());
    }

    #[test]
    fn test_stale_session_expired() {
        let s = session(Utc::now() - Duration::seconds(1));
        assert!(s.is_expired());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let s = session(Utc::now() + Duration::hours(1));
        let json = serde_json::to_string(&s).unwrap();
        let back: CloudSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, "user-1");
        assert_eq!(back.display_name.as_deref(), Some("Ada"));
        assert_eq!(back.email.as_deref(), Some("ada@example.com"));
    }
}
