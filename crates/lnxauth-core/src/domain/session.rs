//! Session record domain entity
//!
//! This module defines the SessionRecord entity which represents the
//! locally persisted authentication state: whether a user is signed in
//! and, if so, the cached display identity from the cloud provider.

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// The locally persisted authentication state
///
/// A SessionRecord is created or overwritten atomically on successful
/// sign-in and cleared atomically on sign-out. It is owned exclusively by
/// the preference store; all other components read it via subscription and
/// never mutate it directly.
///
/// ## Invariant
///
/// `logged_in == false` implies `user_name` and `user_email` are empty.
/// [`SessionRecord::is_consistent`] checks this; the two constructors
/// ([`signed_in`](SessionRecord::signed_in) and `Default`) can only produce
/// consistent records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Whether a user session is currently established
    pub logged_in: bool,
    /// Display name cached from the cloud provider ("" when absent)
    pub user_name: String,
    /// Email address cached from the cloud provider ("" when absent)
    pub user_email: String,
}

impl SessionRecord {
    /// Creates a signed-in record with the given cached identity
    ///
    /// Missing provider fields are represented as empty strings by the
    /// caller; this constructor stores them verbatim.
    pub fn signed_in(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            logged_in: true,
            user_name: name.into(),
            user_email: email.into(),
        }
    }

    /// Returns the signed-out record (all fields at their defaults)
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Returns true if the record satisfies the domain invariant
    pub fn is_consistent(&self) -> bool {
        self.logged_in || (self.user_name.is_empty() && self.user_email.is_empty())
    }

    /// Validates the invariant, returning the record for chaining
    ///
    /// # Errors
    /// Returns `AuthError::Failure` if a signed-out record carries a
    /// residual identity. Used by the preference store when reconstituting
    /// a record from disk.
    pub fn validated(self) -> Result<Self, AuthError> {
        if self.is_consistent() {
            Ok(self)
        } else {
            Err(AuthError::Failure(
                "session record is signed out but retains an identity".to_string(),
            ))
        }
    }
}

impl std::fmt::Display for SessionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.logged_in {
            write!(f, "signed in as {} <{}>", self.user_name, self.user_email)
        } else {
            write!(f, "signed out")
        }
    }
}
