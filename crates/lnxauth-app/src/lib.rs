//! lnxauth App - screen state holders and navigation
//!
//! The library half of the application: the two-screen navigation state
//! machine and the per-screen state holders the binary drives. Both are
//! pure orchestration over the core ports, which keeps them testable
//! with in-memory fakes.

pub mod navigation;
pub mod ui;

pub use navigation::{Navigator, Screen};
