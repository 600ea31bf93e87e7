//! Connectivity monitor port (driven/secondary port)
//!
//! This module defines the interface for observing network reachability as
//! a push stream. The platform exposes reachability through a callback
//! registration API; adapters convert that into a channel-backed stream
//! whose registration lives exactly as long as the subscription.
//!
//! ## Design Notes
//!
//! - Every call to [`IConnectivityMonitor::subscribe`] performs an
//!   independent registration; there is no shared cache between
//!   subscribers. Acceptable at this scale, and it keeps teardown trivial.
//! - The stream emits the current reachability once, immediately, then one
//!   `bool` per transition.
//! - Cleanup is guaranteed by a [`DropGuard`]: dropping the stream cancels
//!   the adapter task that owns the platform registration.

use tokio::sync::mpsc;
use tokio_util::sync::DropGuard;

/// A subscription-scoped stream of reachability values
///
/// Yields the current state first, then one value per transition. Dropping
/// the stream releases the underlying platform registration.
pub struct ConnectivityStream {
    rx: mpsc::Receiver<bool>,
    _guard: Option<DropGuard>,
}

impl ConnectivityStream {
    /// Wraps a receiver together with the guard that owns the registration
    pub fn new(rx: mpsc::Receiver<bool>, guard: DropGuard) -> Self {
        Self {
            rx,
            _guard: Some(guard),
        }
    }

    /// Wraps a bare receiver (for in-memory fakes in tests)
    pub fn from_receiver(rx: mpsc::Receiver<bool>) -> Self {
        Self { rx, _guard: None }
    }

    /// Receives the next reachability value
    ///
    /// Returns `None` once the adapter side has shut down.
    pub async fn recv(&mut self) -> Option<bool> {
        self.rx.recv().await
    }
}

impl std::fmt::Debug for ConnectivityStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectivityStream")
            .field("guarded", &self._guard.is_some())
            .finish()
    }
}

/// Port trait for network reachability observation
#[async_trait::async_trait]
pub trait IConnectivityMonitor: Send + Sync {
    /// Starts an independent reachability subscription
    ///
    /// # Returns
    /// A stream that immediately yields the current reachability, then one
    /// value per transition, until it is dropped.
    async fn subscribe(&self) -> anyhow::Result<ConnectivityStream>;
}
