//! CloudIdentityProvider - IIdentityProvider implementation over Identity Toolkit
//!
//! Wraps the [`IdentityClient`] to fulfil the [`IIdentityProvider`] port
//! contract and tracks the current provider session in memory.
//!
//! ## Design Notes
//!
//! - Uses `tokio::sync::Mutex` because `IIdentityProvider` methods take
//!   `&self` while the current session is replaced on sign-in and sign-out.
//! - The session is process-local only. Durable state lives in the session
//!   store, which keeps the user's identity but never a provider token.
//! - `sign_out` is idempotent; signing out with no current session is a no-op.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use lnxauth_core::ports::{CloudSession, IIdentityProvider};

use crate::client::IdentityClient;

/// Identity provider backed by the Identity Toolkit REST API
pub struct CloudIdentityProvider {
    /// HTTP client for the token exchange
    client: IdentityClient,
    /// The current provider session, if signed in
    current: Mutex<Option<CloudSession>>,
}

impl CloudIdentityProvider {
    /// Creates a new provider over the given client
    pub fn new(client: IdentityClient) -> Self {
        Self {
            client,
            current: Mutex::new(None),
        }
    }

    /// Returns a copy of the current provider session, if any
    pub async fn current_session(&self) -> Option<CloudSession> {
        self.current.lock().await.clone()
    }
}

#[async_trait]
impl IIdentityProvider for CloudIdentityProvider {
    async fn sign_in_with_id_token(&self, id_token: &str) -> Result<CloudSession> {
        let session = self.client.sign_in_with_idp(id_token).await?;

        let mut current = self.current.lock().await;
        *current = Some(session.clone());

        info!(user_id = %session.user_id, "Provider session established");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let mut current = self.current.lock().await;

        if current.take().is_some() {
            info!("Provider session ended");
        } else {
            debug!("Sign-out requested with no current session");
        }

        Ok(())
    }
}
