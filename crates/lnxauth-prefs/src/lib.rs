//! lnxauth Prefs - Durable preference store adapter
//!
//! Implements the `ISessionStore` port over a small JSON file in the
//! user's data directory. The whole record is rewritten on every change
//! (temp-write + rename), which is the atomicity granularity the session
//! record needs, and each field is republished through a `watch` channel
//! after a successful write.

pub mod store;

pub use store::FilePreferenceStore;
