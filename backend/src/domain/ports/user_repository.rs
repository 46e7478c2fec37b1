//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already held by another account.
        DuplicateUsername { username: String } => "username {username} is already taken",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new account.
    ///
    /// Fails with [`UserPersistenceError::DuplicateUsername`] when the
    /// username's uniqueness constraint is violated.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Insert the account unless the username already exists.
    ///
    /// Returns `None`, leaving the existing row untouched, when it does.
    async fn create_if_absent(&self, user: &NewUser)
    -> Result<Option<User>, UserPersistenceError>;
}
