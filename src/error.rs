//! Recoverable wallet failures.
//!
//! None of these end the program: the screen that hits one prints its
//! message and the display loop keeps going. The `Display` text is what
//! the user sees.

use rust_decimal::Decimal;
use thiserror::Error;

/// Everything that can go wrong inside the menu engine, short of terminal I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// The user directory already holds `capacity` users.
    #[error("user directory is full ({capacity} users)")]
    CapacityExceeded { capacity: usize },

    /// No stored user matches the (username, password) pair.
    #[error("Invalid username or password.")]
    CredentialsNotFound,

    /// Withdrawal larger than the current balance. Balance is untouched.
    #[error("Insufficient Balance: requested {requested:.2}, available {available:.2}")]
    InsufficientBalance { requested: Decimal, available: Decimal },

    /// Menu input that matches no option on the active screen.
    #[error("Invalid selection '{0}'. Please try again.")]
    InvalidSelection(String),

    /// Amount input that is not a decimal number (or out of range).
    #[error("Invalid Value '{0}'")]
    InvalidAmount(String),

    /// Balance arithmetic would leave the representable decimal range.
    /// Balance is untouched.
    #[error("Amount {0} is out of range for this balance")]
    AmountOutOfRange(Decimal),

    /// A screen that needs a logged-in user was reached without one.
    #[error("No user is currently logged in.")]
    MissingSession,

    /// Sign-up password and confirmation differ.
    #[error("Password Didn't Match")]
    PasswordMismatch,
}
