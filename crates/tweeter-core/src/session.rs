//! Login session state machine.
//!
//! ```text
//!            login
//!  LoggedOut ──────► LoggedIn(user)
//!      ▲                  │
//!      └──────────────────┘
//!            logout
//! ```
//!
//! Both self-transitions are errors, not silent no-ops. Credential checks
//! happen in the manager; the session only tracks who is logged in.

use crate::error::AuthError;

/// Current session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nobody is logged in.
    #[default]
    LoggedOut,
    /// A user is logged in.
    LoggedIn(String),
}

/// The single active session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create a logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether someone is logged in.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn(_))
    }

    /// Check whether `name` is the logged-in user.
    pub fn is_current(&self, name: &str) -> bool {
        matches!(&self.state, SessionState::LoggedIn(current) if current == name)
    }

    /// Transition to `LoggedIn(name)`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AlreadyLoggedIn` if a session is active.
    pub fn login(&mut self, name: impl Into<String>) -> Result<(), AuthError> {
        if self.is_logged_in() {
            return Err(AuthError::AlreadyLoggedIn);
        }
        self.state = SessionState::LoggedIn(name.into());
        Ok(())
    }

    /// Transition to `LoggedOut`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if no session is active.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if !self.is_logged_in() {
            return Err(AuthError::NotLoggedIn);
        }
        self.state = SessionState::LoggedOut;
        Ok(())
    }

    /// Name of the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` if no session is active.
    pub fn current_user(&self) -> Result<&str, AuthError> {
        match &self.state {
            SessionState::LoggedIn(name) => Ok(name),
            SessionState::LoggedOut => Err(AuthError::NotLoggedIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_out() {
        let session = Session::new();
        assert_eq!(session.state(), &SessionState::LoggedOut);
        assert_eq!(session.current_user(), Err(AuthError::NotLoggedIn));
    }

    #[test]
    fn login_then_logout() {
        let mut session = Session::new();
        session.login("root").unwrap();
        assert_eq!(session.current_user(), Ok("root"));
        assert!(session.is_current("root"));
        assert!(!session.is_current("other"));

        session.logout().unwrap();
        assert!(!session.is_logged_in());
    }

    #[test]
    fn double_login_fails() {
        let mut session = Session::new();
        session.login("root").unwrap();
        assert_eq!(session.login("root"), Err(AuthError::AlreadyLoggedIn));
        assert_eq!(session.login("other"), Err(AuthError::AlreadyLoggedIn));
        assert_eq!(session.current_user(), Ok("root"));
    }

    #[test]
    fn double_logout_fails() {
        let mut session = Session::new();
        session.login("root").unwrap();
        session.logout().unwrap();
        assert_eq!(session.logout(), Err(AuthError::NotLoggedIn));
    }
}
