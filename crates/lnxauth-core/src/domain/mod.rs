//! Domain entities and business logic
//!
//! This module contains the core domain types for lnxauth:
//! - The persisted session record and its consistency invariant
//! - The tagged sign-in/sign-out outcome consumed by state holders
//! - Domain-specific error types carrying the user-facing messages

pub mod errors;
pub mod outcome;
pub mod session;

// Re-export commonly used types
pub use errors::AuthError;
pub use outcome::AuthOutcome;
pub use session::SessionRecord;
