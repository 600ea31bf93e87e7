//! Session store port (driven/secondary port)
//!
//! This module defines the interface for persisting the session record and
//! observing its three fields. Implementations are expected to back the
//! record with the platform preference mechanism (a small file under the
//! user's data directory in the reference adapter).
//!
//! ## Design Notes
//!
//! - Each field is exposed as a `tokio::sync::watch::Receiver`, which
//!   carries the current value at subscription time and wakes subscribers
//!   on every subsequent change — the observable-field contract the
//!   presentation layer relies on.
//! - `save` and `clear` must each be one atomic write of the whole record;
//!   no cross-call transactional guarantee is required beyond that.
//! - Uses `anyhow::Result` because storage errors are adapter-specific.

use tokio::sync::watch;

/// Port trait for durable, observable session storage
///
/// The store is the exclusive owner of the session record. Writers go
/// through [`save`](ISessionStore::save) / [`clear`](ISessionStore::clear);
/// everyone else subscribes to the field receivers.
#[async_trait::async_trait]
pub trait ISessionStore: Send + Sync {
    /// Observes the logged-in flag (false when unset)
    fn logged_in(&self) -> watch::Receiver<bool>;

    /// Observes the cached display name ("" when unset)
    fn user_name(&self) -> watch::Receiver<String>;

    /// Observes the cached email address ("" when unset)
    fn user_email(&self) -> watch::Receiver<String>;

    /// Persists a signed-in record as one atomic write
    ///
    /// Sets `logged_in = true` together with both identity fields.
    async fn save(&self, name: &str, email: &str) -> anyhow::Result<()>;

    /// Resets all three fields to their defaults as one atomic write
    async fn clear(&self) -> anyhow::Result<()>;
}
