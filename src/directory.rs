//! Bounded in-memory user directory.
//!
//! Users are kept in arrival order. Lookup is a linear scan; the directory
//! is small and capped, so there is no index.

use tracing::warn;

use crate::error::WalletError;
use crate::types::User;

/// Capacity-bounded, insertion-ordered collection of users.
///
/// Duplicate usernames are allowed. Lookups hand out copies, so changing a
/// returned user never changes the stored one.
#[derive(Debug)]
pub struct UserDirectory {
    users: Vec<User>,
    capacity: usize,
}

impl UserDirectory {
    pub fn new(capacity: usize) -> Self {
        UserDirectory {
            users: Vec::new(),
            capacity,
        }
    }

    /// Append `user` if there is room. Returns false, unchanged, when full.
    pub fn add(&mut self, user: User) -> bool {
        self.try_add(user).is_ok()
    }

    /// Like [`UserDirectory::add`], reporting a full directory as an error.
    pub fn try_add(&mut self, user: User) -> Result<(), WalletError> {
        if self.users.len() >= self.capacity {
            warn!(capacity = self.capacity, username = user.username(), "user directory full");
            return Err(WalletError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.users.push(user);
        Ok(())
    }

    /// First stored user whose username and password match `candidate`.
    pub fn find_by_credentials(&self, candidate: &User) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.matches_credentials(candidate))
            .cloned()
    }

    pub fn size(&self) -> usize {
        self.users.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.users.len() >= self.capacity
    }
}

// ============================================================================
// TESTS
// ============================================================================
