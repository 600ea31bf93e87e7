//! NetworkManager reachability monitor
//!
//! Subscribes to the NetworkManager `State` property over the system bus
//! and translates it into the port-level reachability stream: the current
//! value is emitted immediately, then one boolean per transition. Dropping
//! the returned stream cancels the forwarding task, which unregisters the
//! D-Bus property watch.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use lnxauth_core::ports::{ConnectivityStream, IConnectivityMonitor};

/// NetworkManager state meaning validated global connectivity
///
/// Lower connected states (site/local) have link but no verified route to
/// the internet, which is the distinction sign-in cares about.
const NM_STATE_CONNECTED_GLOBAL: u32 = 70;

/// Buffered transitions per subscription
const CHANNEL_CAPACITY: usize = 16;

#[zbus::proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
trait NetworkManager {
    /// Overall networking state (NM_STATE_*)
    #[zbus(property)]
    fn state(&self) -> zbus::Result<u32>;
}

/// Maps a NetworkManager state to the reachability boolean
fn is_reachable(state: u32) -> bool {
    state == NM_STATE_CONNECTED_GLOBAL
}

/// Reachability monitor backed by NetworkManager on the system bus
pub struct NetworkMonitor {
    connection: zbus::Connection,
}

impl NetworkMonitor {
    /// Connects to the system bus
    pub async fn new() -> Result<Self> {
        let connection = zbus::Connection::system()
            .await
            .context("Failed to connect to the system bus")?;

        Ok(Self { connection })
    }

    /// Creates a monitor over an existing bus connection
    pub fn with_connection(connection: zbus::Connection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl IConnectivityMonitor for NetworkMonitor {
    async fn subscribe(&self) -> Result<ConnectivityStream> {
        let proxy = NetworkManagerProxy::new(&self.connection)
            .await
            .context("Failed to create NetworkManager proxy")?;

        let initial = is_reachable(
            proxy
                .state()
                .await
                .context("Failed to read NetworkManager state")?,
        );

        let changes = proxy.receive_state_changed().await;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();
        let child = token.clone();

        tokio::spawn(async move {
            let updates = Box::pin(changes.filter_map(|change| async move {
                match change.get().await {
                    Ok(state) => Some(is_reachable(state)),
                    Err(err) => {
                        warn!("Failed to read NetworkManager state change: {}", err);
                        None
                    }
                }
            }));

            forward_reachability(initial, updates, tx, child).await;
        });

        debug!(initial, "Subscribed to NetworkManager reachability");
        Ok(ConnectivityStream::new(rx, token.drop_guard()))
    }
}

/// Forwards reachability values from `updates` into `tx`.
///
/// Emits `initial` first, then one value per transition; repeated values
/// from the source are suppressed. Returns when the subscriber hangs up,
/// the source ends, or `cancel` fires.
async fn forward_reachability<S>(
    initial: bool,
    mut updates: S,
    tx: mpsc::Sender<bool>,
    cancel: CancellationToken,
) where
    S: Stream<Item = bool> + Unpin,
{
    if tx.send(initial).await.is_err() {
        return;
    }

    let mut last = initial;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Reachability subscription cancelled");
                return;
            }
            next = updates.next() => {
                match next {
                    Some(reachable) if reachable != last => {
                        last = reachable;
                        if tx.send(reachable).await.is_err() {
                            return;
                        }
                    }
                    Some(_) => {}
                    None => {
                        debug!("Reachability source ended");
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn test_only_global_connectivity_is_reachable() {
        assert!(is_reachable(70));
        assert!(!is_reachable(60)); // connected, site only
        assert!(!is_reachable(20)); // disconnected
        assert!(!is_reachable(0)); // unknown
    }

    #[tokio::test]
    async fn test_initial_state_is_emitted_immediately() {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        tokio::spawn(forward_reachability(
            true,
            stream::iter(Vec::<bool>::new()),
            tx,
            token,
        ));

        assert_eq!(rx.recv().await, Some(true));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_duplicate_states_are_suppressed() {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        tokio::spawn(forward_reachability(
            true,
            stream::iter(vec![true, false, false, true, true]),
            tx,
            token,
        ));

        assert_eq!(rx.recv().await, Some(true));
        assert_eq!(rx.recv().await, Some(false));
        assert_eq!(rx.recv().await, Some(true));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_forwarding_stops_on_cancel() {
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        let token = CancellationToken::new();

        tokio::spawn(forward_reachability(
            false,
            stream::pending::<bool>(),
            tx,
            token.clone(),
        ));

        assert_eq!(rx.recv().await, Some(false));
        token.cancel();
        assert_eq!(rx.recv().await, None);
    }
}
