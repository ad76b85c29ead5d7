//! Domain types for the digital wallet.
//!
//! Users carry exact decimal balances. Everything here is pure data plus
//! the arithmetic on it; printing is left to the menu layer.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::WalletError;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Parse user input as a decimal amount.
///
/// Accepts any decimal literal after trimming surrounding whitespace,
/// including negative values. Sign checks belong to the caller.
pub fn parse_amount(input: &str) -> Result<Decimal, WalletError> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed).map_err(|_| WalletError::InvalidAmount(trimmed.to_string()))
}

/// Format an amount the way every screen shows money.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

// ============================================================================
// USER
// ============================================================================

/// A wallet account.
///
/// Identity is the (username, password) pair: two users with the same name
/// but different passwords are different users. Balance does not take part
/// in equality.
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    password: String,
    balance: Decimal,
}

impl User {
    /// Create a user with a zero balance.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            username: username.into(),
            password: password.into(),
            balance: Decimal::ZERO,
        }
    }

    /// Create a user with an opening balance.
    pub fn with_balance(
        username: impl Into<String>,
        password: impl Into<String>,
        balance: Decimal,
    ) -> Self {
        User {
            balance,
            ..User::new(username, password)
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Add `amount` to the balance.
    ///
    /// No sign or upper-bound check: screens reject non-positive deposits
    /// before calling this. Only a sum outside the decimal range fails
    /// (`AmountOutOfRange`), leaving the balance untouched.
    pub fn deposit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(WalletError::AmountOutOfRange(amount))?;
        Ok(())
    }

    /// Subtract `amount` from the balance.
    ///
    /// Fails with `InsufficientBalance` when `amount > balance`, or with
    /// `AmountOutOfRange` when a negative amount would push the balance
    /// past the decimal range. Either way the balance is untouched.
    /// Never clamps.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), WalletError> {
        if amount > self.balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(WalletError::AmountOutOfRange(amount))?;
        Ok(())
    }

    /// True when both username and password match.
    pub fn matches_credentials(&self, other: &User) -> bool {
        self.username == other.username && self.password == other.password
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.matches_credentials(other)
    }
}

impl Eq for User {}

// ============================================================================
// MESSAGES
// ============================================================================

/// How loudly a message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// A user inserted into the directory at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub balance: Decimal,
}

impl SeedUser {
    pub fn to_user(&self) -> User {
        User::with_balance(self.username.clone(), self.password.clone(), self.balance)
    }
}

impl Default for SeedUser {
    fn default() -> Self {
        Self {
            username: "Mohamed".to_string(),
            password: "12345".to_string(),
            balance: Decimal::from(2000),
        }
    }
}

/// Configuration for one run of the wallet.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Maximum number of users the directory accepts.
    pub capacity: usize,
    /// User available before anyone signs up (None = empty directory).
    pub seed_user: Option<SeedUser>,
    /// Color severity prefixes on the terminal.
    pub color: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            seed_user: Some(SeedUser::default()),
            color: true,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
