//! Navigation controller.
//!
//! Holds the single current-screen value. Two ways to move:
//!
//! - [`Navigator::dispatch`] applies a [`NavEvent`] through the transition
//!   table and refuses pairs the table does not define.
//! - [`Navigator::jump_to`] sets any screen unconditionally.
//!
//! [`Navigator::sync_auth`] lets the identity provider force screens:
//! a loaded, signed-in session always lands on the dashboard, and losing
//! the session while on the dashboard returns to the entry screen.

use tracing::debug;

use crate::auth::AuthSnapshot;
use crate::error::NavigationError;
use crate::screen::{transition, NavEvent, Screen};

#[derive(Debug, Clone)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the entry screen.
    pub fn new() -> Self {
        Self::starting_at(Screen::ENTRY)
    }

    pub fn starting_at(screen: Screen) -> Self {
        Self { current: screen }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply `event` through the transition table.
    ///
    /// On an undefined pair the current screen is left untouched.
    pub fn dispatch(&mut self, event: NavEvent) -> Result<Screen, NavigationError> {
        let from = self.current;
        let to = transition(from, event)
            .ok_or(NavigationError::InvalidTransition { from, event })?;

        debug!("Navigate {} --{:?}--> {}", from, event, to);
        self.current = to;
        Ok(to)
    }

    /// Set the current screen without consulting the transition table.
    pub fn jump_to(&mut self, screen: Screen) -> Screen {
        if screen != self.current {
            debug!("Jump {} --> {}", self.current, screen);
        }
        self.current = screen;
        screen
    }

    /// Reconcile the current screen with the identity provider's state.
    ///
    /// Does nothing while the provider is still loading.
    /// Returns the screen after reconciliation.
    pub fn sync_auth(&mut self, auth: AuthSnapshot) -> Screen {
        if !auth.is_loaded {
            return self.current;
        }

        if auth.is_signed_in {
            self.jump_to(Screen::Dashboard)
        } else if self.current == Screen::Dashboard {
            self.jump_to(Screen::ENTRY)
        } else {
            self.current
        }
    }
}
