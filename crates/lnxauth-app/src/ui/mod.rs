//! Per-screen state holders
//!
//! Each screen owns a state holder that exposes its UI state through a
//! `watch` channel and mirrors the relevant session-store fields while it
//! is alive. All sign-in and sign-out work funnels through the auth
//! session use case; the holders only translate outcomes into UI state.

pub mod home;
pub mod login;

pub use home::{HomeModel, HomeUiState};
pub use login::{LoginModel, LoginUiState};
