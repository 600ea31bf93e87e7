//! lnxauth Connectivity - network reachability adapter
//!
//! Implements the `IConnectivityMonitor` port over NetworkManager's D-Bus
//! interface. Each subscription reads the current state, then forwards
//! state changes as a deduplicated stream of reachability booleans; the
//! D-Bus watch is torn down when the stream is dropped.

pub mod monitor;

pub use monitor::NetworkMonitor;
