//! Home screen state holder

use std::sync::Arc;

use lnxauth_core::{domain::AuthOutcome, ports::ISessionStore, usecases::AuthSessionUseCase};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Observable state of the home screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeUiState {
    /// Display name from the persisted session
    pub user_name: String,
    /// Email from the persisted session
    pub user_email: String,
    /// A sign-out attempt is in flight
    pub is_loading: bool,
    /// Message from the last failed attempt, until dismissed
    pub error_message: Option<String>,
    /// The user has signed out during this holder's lifetime
    pub is_signed_out: bool,
}

/// State holder for the home screen
///
/// Mirrors the store's name and email fields while alive, so the greeting
/// always reflects the persisted session.
pub struct HomeModel {
    auth: Arc<AuthSessionUseCase>,
    state: Arc<watch::Sender<HomeUiState>>,
    mirror: JoinHandle<()>,
}

impl HomeModel {
    /// Creates the holder and starts mirroring the store's identity fields
    pub fn new(auth: Arc<AuthSessionUseCase>, store: Arc<dyn ISessionStore>) -> Self {
        let mut user_name = store.user_name();
        let mut user_email = store.user_email();

        let initial = HomeUiState {
            user_name: user_name.borrow_and_update().clone(),
            user_email: user_email.borrow_and_update().clone(),
            ..HomeUiState::default()
        };
        let state = Arc::new(watch::channel(initial).0);

        let mirror = tokio::spawn({
            let state = Arc::clone(&state);
            async move {
                loop {
                    {
                        let name = user_name.borrow_and_update().clone();
                        let email = user_email.borrow_and_update().clone();
                        state.send_if_modified(|s| {
                            if s.user_name != name || s.user_email != email {
                                s.user_name = name;
                                s.user_email = email;
                                true
                            } else {
                                false
                            }
                        });
                    }

                    tokio::select! {
                        changed = user_name.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
                        changed = user_email.changed() => {
                            if changed.is_err() {
                                break;
                            }
                        }
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
    pub fn state(&self) -> watch::Receiver<HomeUiState> {
        self.state.subscribe()
    }

    /// Signs out and clears the persisted session
    ///
    /// At most one attempt runs at a time: if one is already in flight,
    /// this returns [`AuthOutcome::Loading`] without starting another.
    pub async fn sign_out(&self) -> AuthOutcome {
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
            debug!("Sign-out already in flight, ignoring request");
            return AuthOutcome::Loading;
        }

        let outcome = self.auth.sign_out().await;

        self.state.send_modify(|s| {
            s.is_loading = false;
            match &outcome {
                AuthOutcome::Success => s.is_signed_out = true,
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

impl Drop for HomeModel {
    fn drop(&mut self) {
        self.mirror.abort();
    }
}
