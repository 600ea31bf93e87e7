//! Port definitions (hexagonal architecture interfaces)
//!
//! This module defines the port traits that form the boundaries of the
//! hexagonal architecture. Ports are interfaces that the domain core
//! depends on, but whose implementations live in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`ICredentialBroker`] - Interactive credential acquisition (Google sign-in)
//! - [`IIdentityProvider`] - Cloud identity backend (ID-token exchange)
//! - [`ISessionStore`] - Durable, observable session record storage
//! - [`IConnectivityMonitor`] - Network reachability as a push stream

pub mod connectivity;
pub mod credential_broker;
pub mod identity_provider;
pub mod session_store;

pub use connectivity::{ConnectivityStream, IConnectivityMonitor};
pub use credential_broker::{Credential, CredentialKind, CredentialRequest, ICredentialBroker};
pub use identity_provider::{CloudSession, IIdentityProvider};
pub use session_store::ISessionStore;
