//! Two-screen navigation state machine
//!
//! The application has exactly two screens, and movement between them is
//! one-way per event: a sign-in success moves Login to Home, a sign-out
//! moves Home to Login. Repeated events on the wrong screen are ignored,
//! so a duplicated success or sign-out can never stack screens or loop.

use tracing::debug;

/// The screens the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Sign-in screen, shown while no session exists
    Login,
    /// Signed-in landing screen
    Home,
}

/// Tracks the current screen and applies navigation events
#[derive(Debug)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    /// Picks the start screen from the persisted login flag
    pub fn from_logged_in(logged_in: bool) -> Self {
        let current = if logged_in { Screen::Home } else { Screen::Login };
        debug!(?current, "Navigator seeded");
        Self { current }
    }

    /// Returns the current screen
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Applies a sign-in success event
    ///
    /// Moves Login to Home and returns `true`; on any other screen the
    /// event is ignored and `false` is returned.
    pub fn on_sign_in_success(&mut self) -> bool {
        if self.current == Screen::Login {
            self.current = Screen::Home;
            debug!("Navigated to Home");
            true
        } else {
            debug!("Ignored sign-in success outside Login");
            false
        }
    }

    /// Applies a signed-out event
    ///
    /// Moves Home to Login and returns `true`; on any other screen the
    /// event is ignored and `false` is returned.
    pub fn on_signed_out(&mut self) -> bool {
        if self.current == Screen::Home {
            self.current = Screen::Login;
            debug!("Navigated to Login");
            true
        } else {
            debug!("Ignored sign-out outside Home");
            false
        }
    }
}
