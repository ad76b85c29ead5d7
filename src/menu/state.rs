//! Menu state algebra: screens, session, transitions.
//!
//! Screens encode their own outgoing edges: a screen's reaction returns a
//! [`Transition`] naming the next screen (if any) and an outcome, and the
//! host applies it. Screens never reach into the host.
//!
//! Shared data (the logged-in user) lives in [`SessionState`]; screens
//! carry no per-screen data of their own.

use crate::types::User;

// ============================================================================
// SCREENS
// ============================================================================

/// One state of the menu state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Entry point: sign up, log in or quit.
    #[default]
    Welcome,
    /// Credential prompt.
    Login,
    /// New account form.
    SignUp,
    /// Balance, withdraw, deposit, bills, logout. Needs a session user.
    UserMenu,
    /// Bill payments. Needs a session user.
    PayPills,
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// What the display loop should do after a reaction.
///
/// Orthogonal to whether the active screen changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionOutcome {
    /// Keep running.
    #[default]
    Continue,
    /// Something recoverable went wrong; keep running.
    Error,
    /// Stop the loop.
    Exit,
}

/// Result of one render-and-react step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Screen to activate. None keeps the current one.
    pub next: Option<Screen>,
    pub outcome: TransitionOutcome,
}

impl Transition {
    /// Switch to `screen` and keep running.
    pub fn to(screen: Screen) -> Self {
        Transition {
            next: Some(screen),
            outcome: TransitionOutcome::Continue,
        }
    }

    /// Switch to `screen`, reporting a recoverable error.
    pub fn to_with_error(screen: Screen) -> Self {
        Transition {
            next: Some(screen),
            outcome: TransitionOutcome::Error,
        }
    }

    /// Stay on the current screen and keep running.
    pub fn stay() -> Self {
        Transition {
            next: None,
            outcome: TransitionOutcome::Continue,
        }
    }

    /// Stay on the current screen, reporting a recoverable error.
    pub fn error() -> Self {
        Transition {
            next: None,
            outcome: TransitionOutcome::Error,
        }
    }

    /// Stop the loop.
    pub fn exit() -> Self {
        Transition {
            next: None,
            outcome: TransitionOutcome::Exit,
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Shared mutable record passed into every screen.
///
/// `current_user` is a copy of the directory's record taken at login.
/// Deposits and withdrawals change this copy only.
#[derive(Debug, Default)]
pub struct SessionState {
    pub current_user: Option<User>,
    pub last_outcome: TransitionOutcome,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn log_in(&mut self, user: User) {
        self.current_user = Some(user);
    }

    pub fn log_out(&mut self) {
        self.current_user = None;
    }
}

// ============================================================================
// TESTS
// ============================================================================
