//! End-to-end application flow tests
//!
//! Drives the screen state holders and the navigation state machine over
//! a real file-backed session store in a temporary directory, with the
//! interactive broker and the identity provider replaced by stubs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tempfile::TempDir;

use lnxauth_app::ui::{HomeModel, LoginModel};
use lnxauth_app::{Navigator, Screen};
use lnxauth_core::domain::AuthOutcome;
use lnxauth_core::ports::{
    CloudSession, Credential, CredentialRequest, ICredentialBroker, IIdentityProvider,
    ISessionStore,
};
use lnxauth_core::usecases::AuthSessionUseCase;
use lnxauth_prefs::FilePreferenceStore;

struct StubBroker {
    token: Option<&'static str>,
}

#[async_trait]
impl ICredentialBroker for StubBroker {
    async fn get_credential(&self, _request: &CredentialRequest) -> anyhow::Result<Credential> {
        match self.token {
            Some(token) => Ok(Credential::google(token)),
            None => Err(anyhow::anyhow!("user dismissed the account picker")),
        }
    }
}

struct StubProvider {
    name: Option<&'static str>,
    email: Option<&'static str>,
}

#[async_trait]
impl IIdentityProvider for StubProvider {
    async fn sign_in_with_id_token(&self, _id_token: &str) -> anyhow::Result<CloudSession> {
        Ok(CloudSession {
            user_id: "uid-001".to_string(),
            display_name: self.name.map(str::to_string),
            email: self.email.map(str::to_string),
            expires_at: Utc::now() + Duration::hours(1),
        })
    }

    async fn sign_out(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

async fn open_store(dir: &TempDir) -> Arc<FilePreferenceStore> {
    Arc::new(
        FilePreferenceStore::open(dir.path().join("session.json"))
            .await
            .expect("open store"),
    )
}

fn use_case(
    broker: StubBroker,
    provider: StubProvider,
    store: Arc<FilePreferenceStore>,
) -> Arc<AuthSessionUseCase> {
    Arc::new(AuthSessionUseCase::new(
        Arc::new(broker),
        Arc::new(provider),
        store,
        "client-123",
    ))
}

#[tokio::test]
async fn full_sign_in_and_sign_out_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    // Fresh store starts on the login screen.
    let mut navigator = Navigator::from_logged_in(*store.logged_in().borrow());
    assert_eq!(navigator.current(), Screen::Login);

    let auth = use_case(
        StubBroker {
            token: Some("id-token-abc"),
        },
        StubProvider {
            name: Some("Ada"),
            email: Some("ada@example.com"),
        },
        store.clone(),
    );

    let login = LoginModel::new(auth.clone(), store.clone() as Arc<dyn ISessionStore>);
    assert_eq!(login.sign_in().await, AuthOutcome::Success);

    let state = login.state().borrow().clone();
    assert!(state.is_signed_in);
    assert!(!state.is_loading);
    assert_eq!(state.error_message, None);

    assert!(navigator.on_sign_in_success());
    assert_eq!(navigator.current(), Screen::Home);

    // The identity landed in the durable store.
    assert!(*store.logged_in().borrow());
    assert_eq!(*store.user_name().borrow(), "Ada");
    assert_eq!(*store.user_email().borrow(), "ada@example.com");

    // Home greets from the store and signs out.
    let home = HomeModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    let state = home.state().borrow().clone();
    assert_eq!(state.user_name, "Ada");
    assert_eq!(state.user_email, "ada@example.com");

    assert_eq!(home.sign_out().await, AuthOutcome::Success);
    assert!(home.state().borrow().is_signed_out);

    assert!(navigator.on_signed_out());
    assert_eq!(navigator.current(), Screen::Login);

    assert!(!*store.logged_in().borrow());
    assert_eq!(*store.user_name().borrow(), "");
    assert_eq!(*store.user_email().borrow(), "");
}

#[tokio::test]
async fn reopened_store_seeds_home_screen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = open_store(&dir).await;
        store.save("Ada", "ada@example.com").await.unwrap();
    }

    let store = open_store(&dir).await;
    let navigator = Navigator::from_logged_in(*store.logged_in().borrow());
    assert_eq!(navigator.current(), Screen::Home);
}

#[tokio::test]
async fn failed_sign_in_sets_error_and_leaves_store_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let auth = use_case(
        StubBroker { token: None },
        StubProvider {
            name: Some("Ada"),
            email: Some("ada@example.com"),
        },
        store.clone(),
    );

    let login = LoginModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    let outcome = login.sign_in().await;

    match outcome {
        AuthOutcome::Error(message) => {
            assert!(message.starts_with("Sign in failed:"), "got: {message}");
            assert!(message.contains("user dismissed the account picker"));
        }
        other => panic!("expected error outcome, got {other:?}"),
    }

    let state = login.state().borrow().clone();
    assert!(!state.is_signed_in);
    assert!(!state.is_loading);
    assert!(state.error_message.is_some());

    // Dismissing the error clears only the message.
    login.clear_error();
    assert_eq!(login.state().borrow().error_message, None);

    // Nothing was persisted.
    assert!(!*store.logged_in().borrow());
    assert_eq!(*store.user_name().borrow(), "");
}

#[tokio::test]
async fn missing_profile_fields_default_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let auth = use_case(
        StubBroker {
            token: Some("id-token-abc"),
        },
        StubProvider {
            name: None,
            email: None,
        },
        store.clone(),
    );

    let login = LoginModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    assert_eq!(login.sign_in().await, AuthOutcome::Success);

    assert!(*store.logged_in().borrow());
    assert_eq!(*store.user_name().borrow(), "");
    assert_eq!(*store.user_email().borrow(), "");
}

#[tokio::test]
async fn login_model_mirrors_external_store_changes() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let auth = use_case(
        StubBroker {
            token: Some("id-token-abc"),
        },
        StubProvider {
            name: Some("Ada"),
            email: Some("ada@example.com"),
        },
        store.clone(),
    );

    let login = LoginModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    let mut state = login.state();
    assert!(!state.borrow_and_update().is_signed_in);

    // A session established outside the model still shows up.
    store.save("Ada", "ada@example.com").await.unwrap();

    while !state.borrow_and_update().is_signed_in {
        state.changed().await.expect("state channel closed");
    }
}

#[tokio::test]
async fn home_model_mirrors_profile_updates() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;
    store.save("Ada", "ada@example.com").await.unwrap();

    let auth = use_case(
        StubBroker {
            token: Some("id-token-abc"),
        },
        StubProvider {
            name: Some("Ada"),
            email: Some("ada@example.com"),
        },
        store.clone(),
    );

    let home = HomeModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    let mut state = home.state();
    assert_eq!(state.borrow_and_update().user_name, "Ada");

    store.save("Grace", "grace@example.com").await.unwrap();

    while state.borrow_and_update().user_name != "Grace" {
        state.changed().await.expect("state channel closed");
    }
    assert_eq!(state.borrow().user_email, "grace@example.com");
}

#[tokio::test]
async fn sign_out_when_already_signed_out_still_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let auth = use_case(
        StubBroker {
            token: Some("id-token-abc"),
        },
        StubProvider {
            name: Some("Ada"),
            email: Some("ada@example.com"),
        },
        store.clone(),
    );

    let home = HomeModel::new(auth, store.clone() as Arc<dyn ISessionStore>);
    assert_eq!(home.sign_out().await, AuthOutcome::Success);
    assert_eq!(home.sign_out().await, AuthOutcome::Success);
}
