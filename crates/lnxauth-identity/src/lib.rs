//! lnxauth Identity - Google sign-in adapters
//!
//! Provides the two identity-facing adapters:
//! - A credential broker that obtains a Google ID token interactively
//!   (OAuth2 Authorization Code with PKCE plus a loopback callback server)
//! - A cloud identity provider that exchanges that ID token for a
//!   provider session over the Identity Toolkit REST API
//!
//! ## Modules
//!
//! - [`broker`] - Interactive Google credential acquisition
//! - [`client`] - Identity Toolkit HTTP client
//! - [`provider`] - `IIdentityProvider` implementation over the client

pub mod broker;
pub mod client;
pub mod provider;

use thiserror::Error;

/// Errors that can occur when talking to the identity endpoints
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The request was rejected (malformed ID token, wrong audience, ...)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The API key or credential is invalid or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The key exists but is not allowed to call this endpoint
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A server-side error occurred (5xx)
    #[error("Server error: {0}")]
    ServerError(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
