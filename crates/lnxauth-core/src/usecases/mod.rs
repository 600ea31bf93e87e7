//! Use cases (interactors) for lnxauth
//!
//! This module contains the application use cases that orchestrate
//! domain entities and port interfaces. Use cases are thin coordinators
//! that delegate identity work to the broker/provider ports and
//! persistence to the session store port.
//!
//! ## Use Cases
//!
//! - [`AuthSessionUseCase`] - Sign-in and sign-out orchestration

pub mod auth_session;

pub use auth_session::AuthSessionUseCase;
