//! Login screen state holder

use std::sync::Arc;

use lnxauth_core::{domain::AuthOutcome, ports::ISessionStore, usecases::AuthSessionUseCase};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Observable state of the login screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginUiState {
    /// A sign-in attempt is in flight
    pub is_loading: bool,
    /// Message from the last failed attempt, until dismissed
    pub error_message: Option<String>,
    /// The persisted session says the user is signed in
    pub is_signed_in: bool,
}

/// State holder for the login screen
///
/// Mirrors the store's login flag into [`LoginUiState::is_signed_in`] for
/// as long as the holder is alive, so a session established elsewhere
/// (another process writing the same store) is still picked up.
pub struct LoginModel {
    auth: Arc<AuthSessionUseCase>,
    state: Arc<watch::Sender<LoginUiState>>,
    mirror: JoinHandle<()>,
}

impl LoginModel {
    /// Creates the holder and starts mirroring the store's login flag
    pub fn new(auth: Arc<AuthSessionUseCase>, store: Arc<dyn ISessionStore>) -> Self {
        let mut logged_in = store.logged_in();

        let initial = LoginUiState {
            is_signed_in: *logged_in.borrow_and_update(),
            ..LoginUiState::default()
        };
        let state = Arc::new(watch::channel(initial).0);

        let mirror = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                loop {
                    let value = *logged_in.borrow_and_update();
                    state.send_if_modified(|s| {
                        if s.is_signed_in != value {
                            s.is_signed_in = value;
                            true
                        } else {
                            false
                        }
                    });
                    if logged_in.changed().await.is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            auth,
            state,
            mirror,
        }
    }

    /// Returns a receiver for the screen state
    pub fn state(&self) -> watch::Receiver<LoginUiState> {
        self.state.subscribe()
    }

    /// Runs the interactive sign-in flow
    ///
    /// At most one attempt runs at a time: if one is already in flight,
    /// this returns [`AuthOutcome::Loading`] without starting another.
    pub async fn sign_in(&self) -> AuthOutcome {
        let started = self.state.send_if_modified(|s| {
            if s.is_loading {
                false
            } else {
                s.is_loading = true;
                s.error_message = None;
                true
            }
        });

        if !started {
            debug!("Sign-in already in flight, ignoring request");
            return AuthOutcome::Loading;
        }

        let outcome = self.auth.sign_in().await;

        self.state.send_modify(|s| {
            s.is_loading = false;
            match &outcome {
                AuthOutcome::Success => s.is_signed_in = true,
                AuthOutcome::Error(message) => s.error_message = Some(message.clone()),
                AuthOutcome::Loading => {}
            }
        });

        outcome
    }

    /// Dismisses the current error message, if any
    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| {
            if s.error_message.is_some() {
                s.error_message = None;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for LoginModel {
    fn drop(&mut self) {
        self.mirror.abort();
    }
}
