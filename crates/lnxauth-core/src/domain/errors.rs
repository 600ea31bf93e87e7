//! Domain error types
//!
//! This module defines the sign-in/sign-out error taxonomy. The `Display`
//! strings are the exact user-facing messages: the use case converts each
//! of these into `AuthOutcome::Error(message)` at its boundary, so there
//! are no distinct recovery paths downstream.

use thiserror::Error;

/// Errors that can occur during sign-in or sign-out
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential broker failed or the user cancelled the request
    #[error("Sign in failed: {0}")]
    CredentialRequest(String),

    /// The credential payload did not contain a usable ID token
    #[error("Invalid ID token response: {0}")]
    TokenParse(String),

    /// The broker returned a credential of a kind this system does not handle
    #[error("Unexpected credential type: {0}")]
    UnexpectedCredentialType(String),

    /// Ending the cloud session or clearing the record failed
    #[error("Sign out failed: {0}")]
    SignOut(String),

    /// Any other failure along the sign-in path
    #[error("Sign in failed: {0}")]
    Failure(String),
}
