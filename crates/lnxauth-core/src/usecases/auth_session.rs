//! Auth session use case
//!
//! Orchestrates sign-in (credential acquisition via the broker, ID-token
//! exchange with the cloud identity provider, persistence of the resulting
//! identity) and sign-out (ending the local cloud session and clearing the
//! persisted record).
//!
//! This is the error boundary of the system: every failure from the broker,
//! the provider or the store is caught here and converted into an
//! [`AuthOutcome::Error`] carrying a human-readable message. Nothing below
//! the presentation layer panics or propagates.

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    domain::{AuthError, AuthOutcome},
    ports::{
        CredentialKind, CredentialRequest, ICredentialBroker, IIdentityProvider, ISessionStore,
    },
};

/// Use case for session lifecycle operations
///
/// Coordinates the credential broker, the cloud identity provider and the
/// durable session store. Side effects are confined to store writes and
/// provider calls. No retry logic: a failed attempt returns `Error` and the
/// caller may simply re-invoke.
pub struct AuthSessionUseCase {
    broker: Arc<dyn ICredentialBroker>,
    identity: Arc<dyn IIdentityProvider>,
    store: Arc<dyn ISessionStore>,
    /// OAuth client id of the backend the brokered token is minted for
    server_client_id: String,
}

impl AuthSessionUseCase {
    /// Creates a new AuthSessionUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `broker` - Interactive credential acquisition
    /// * `identity` - Cloud identity backend for the token exchange
    /// * `store` - Durable session record storage
    /// * `server_client_id` - Client id passed through to the broker
    pub fn new(
        broker: Arc<dyn ICredentialBroker>,
        identity: Arc<dyn IIdentityProvider>,
        store: Arc<dyn ISessionStore>,
        server_client_id: impl Into<String>,
    ) -> Self {
        Self {
            broker,
            identity,
            store,
            server_client_id: server_client_id.into(),
        }
    }

    /// Runs the sign-in flow
    ///
    /// 1. Requests one credential from the broker (no stored-account filter)
    /// 2. Accepts exactly the Google ID token credential kind
    /// 3. Exchanges the ID token for a cloud session
    /// 4. Persists the resulting identity (name/email defaulting to "")
    ///
    /// The session record is only mutated on a fully successful exchange;
    /// any earlier failure leaves it untouched.
    pub async fn sign_in(&self) -> AuthOutcome {
        match self.try_sign_in().await {
            Ok(()) => {
                info!("Sign-in completed, session record persisted");
                AuthOutcome::Success
            }
            Err(err) => {
                warn!(error = %err, "Sign-in failed");
                AuthOutcome::Error(err.to_string())
            }
        }
    }

    async fn try_sign_in(&self) -> Result<(), AuthError> {
        let request = CredentialRequest::new(&self.server_client_id);

        let credential = self
            .broker
            .get_credential(&request)
            .await
            .map_err(|e| AuthError::CredentialRequest(format!("{e:#}")))?;

        // Exactly one credential kind is recognized; reject everything else
        // before any network or storage side effect.
        if let CredentialKind::Unrecognized(tag) = credential.kind() {
            return Err(AuthError::UnexpectedCredentialType(tag.clone()));
        }

        let id_token = credential.google_id_token()?;

        let session = self
            .identity
            .sign_in_with_id_token(&id_token)
            .await
            .map_err(|e| AuthError::Failure(format!("{e:#}")))?;

        let name = session.display_name.unwrap_or_default();
        let email = session.email.unwrap_or_default();

        self.store
            .save(&name, &email)
            .await
            .map_err(|e| AuthError::Failure(format!("{e:#}")))?;

        Ok(())
    }

    /// Runs the sign-out flow
    ///
    /// Ends the local cloud session, then clears the persisted record as
    /// one atomic write. Signing out while already signed out is a no-op
    /// that still reports `Success`.
    pub async fn sign_out(&self) -> AuthOutcome {
        match self.try_sign_out().await {
            Ok(()) => {
                info!("Sign-out completed, session record cleared");
                AuthOutcome::Success
            }
            Err(err) => {
                warn!(error = %err, "Sign-out failed");
                AuthOutcome::Error(err.to_string())
            }
        }
    }

    async fn try_sign_out(&self) -> Result<(), AuthError> {
        self.identity
            .sign_out()
            .await
            .map_err(|e| AuthError::SignOut(format!("{e:#}")))?;

        self.store
            .clear()
            .await
            .map_err(|e| AuthError::SignOut(format!("{e:#}")))?;

        Ok(())
    }
}
