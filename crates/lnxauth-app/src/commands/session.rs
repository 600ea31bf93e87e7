//! Session commands - Login, Logout, and Status
//!
//! Provides the `lnxauth` CLI commands which:
//! 1. `login`  - Runs the interactive Google sign-in flow and persists the
//!    resulting identity in the session store.
//! 2. `logout` - Ends the provider session and clears the session store.
//! 3. `status` - Shows the persisted session record.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use tracing::{debug, info};

use lnxauth_app::ui::{HomeModel, LoginModel};
use lnxauth_app::{Navigator, Screen};
use lnxauth_connectivity::NetworkMonitor;
use lnxauth_core::{
    config::Config, domain::AuthOutcome, ports::IConnectivityMonitor, ports::ISessionStore,
    usecases::AuthSessionUseCase,
};
use lnxauth_identity::{
    broker::{BrokerConfig, GoogleCredentialBroker},
    client::IdentityClient,
    provider::CloudIdentityProvider,
};
use lnxauth_prefs::FilePreferenceStore;

use crate::output::Output;

/// Sign in with a Google account
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// OAuth client ID of the backend the token is minted for
    #[arg(long)]
    client_id: Option<String>,
}

/// Sign out and clear the stored session
#[derive(Debug, Args)]
pub struct LogoutCommand {}

/// Show the stored session
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl LoginCommand {
    pub async fn execute(&self, config: &Config, out: &Output) -> Result<()> {
        let server_client_id = self
            .client_id
            .clone()
            .or_else(|| config.auth.server_client_id.clone())
            .context(
                "No client ID provided. Use --client-id or set auth.server_client_id in config.yaml",
            )?;

        let api_key = config
            .auth
            .api_key
            .clone()
            .context("No API key configured. Set auth.api_key in config.yaml")?;

        let store = super::open_store(config).await?;

        let mut navigator = Navigator::from_logged_in(*store.logged_in().borrow());
        if navigator.current() == Screen::Home {
            out.info(&format!(
                "Already signed in as {} ({})",
                *store.user_name().borrow(),
                *store.user_email().borrow()
            ));
            return Ok(());
        }

        warn_if_unreachable(out).await;

        info!(client_id = %server_client_id, "Starting sign-in");

        let auth = build_use_case(config, &api_key, &server_client_id, store.clone());
        let model = LoginModel::new(auth, store.clone() as Arc<dyn ISessionStore>);

        out.info("Opening browser for Google sign-in...");
        match model.sign_in().await {
            AuthOutcome::Success => {
                navigator.on_sign_in_success();
                out.success(&format!(
                    "Signed in as {} ({})",
                    *store.user_name().borrow(),
                    *store.user_email().borrow()
                ));
                Ok(())
            }
            AuthOutcome::Error(message) => Err(anyhow!(message)),
            AuthOutcome::Loading => {
                out.info("A sign-in is already in progress");
                Ok(())
            }
        }
    }
}

impl LogoutCommand {
    pub async fn execute(&self, config: &Config, out: &Output) -> Result<()> {
        let store = super::open_store(config).await?;

        let mut navigator = Navigator::from_logged_in(*store.logged_in().borrow());
        if navigator.current() == Screen::Login {
            out.info("Not signed in. Nothing to do.");
            return Ok(());
        }

        let api_key = config.auth.api_key.clone().unwrap_or_default();
        let client_id = config.auth.server_client_id.clone().unwrap_or_default();

        let auth = build_use_case(config, &api_key, &client_id, store.clone());
        let model = HomeModel::new(auth, store.clone() as Arc<dyn ISessionStore>);

        match model.sign_out().await {
            AuthOutcome::Success => {
                navigator.on_signed_out();
                out.success("Signed out");
                Ok(())
            }
            AuthOutcome::Error(message) => Err(anyhow!(message)),
            AuthOutcome::Loading => {
                out.info("A sign-out is already in progress");
                Ok(())
            }
        }
    }
}

impl StatusCommand {
    pub async fn execute(&self, config: &Config, out: &Output) -> Result<()> {
        let store = super::open_store(config).await?;

        let logged_in = *store.logged_in().borrow();
        let user_name = store.user_name().borrow().clone();
        let user_email = store.user_email().borrow().clone();

        if out.is_json() {
            out.print_json(&serde_json::json!({
                "signed_in": logged_in,
                "user_name": user_name,
                "user_email": user_email,
                "preferences_file": config.preferences.file.display().to_string(),
            }));
            return Ok(());
        }

        if logged_in {
            out.success(&format!("Signed in as {} ({})", user_name, user_email));
        } else {
            out.info("Not signed in");
            out.info("Run 'lnxauth login' to sign in");
        }

        Ok(())
    }
}

/// Wires the adapters into the auth session use case
fn build_use_case(
    config: &Config,
    api_key: &str,
    server_client_id: &str,
    store: Arc<FilePreferenceStore>,
) -> Arc<AuthSessionUseCase> {
    let broker = GoogleCredentialBroker::new(BrokerConfig {
        redirect_port: config.auth.redirect_port,
        ..BrokerConfig::default()
    });
    let provider = CloudIdentityProvider::new(IdentityClient::new(api_key));

    Arc::new(AuthSessionUseCase::new(
        Arc::new(broker),
        Arc::new(provider),
        store,
        server_client_id,
    ))
}

/// Warns when the network looks unreachable before an interactive sign-in.
///
/// Reachability is advisory only: if the system bus or NetworkManager is
/// unavailable the check is skipped rather than blocking sign-in.
async fn warn_if_unreachable(out: &Output) {
    let monitor = match NetworkMonitor::new().await {
        Ok(monitor) => monitor,
        Err(err) => {
            debug!("Skipping reachability check, system bus unavailable: {err:#}");
            return;
        }
    };

    match monitor.subscribe().await {
        Ok(mut stream) => {
            if stream.recv().await == Some(false) {
                out.warn("Network is unreachable; sign-in will likely fail");
            }
        }
        Err(err) => debug!("Skipping reachability check: {err:#}"),
    }
}
