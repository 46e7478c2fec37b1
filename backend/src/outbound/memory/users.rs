//! Process-local `UserRepository`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, Username};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    next_id: i32,
}

/// In-memory user store with the same uniqueness rule as the `users` table.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored accounts named `username`; at most one by construction.
    pub fn count_named(&self, username: &str) -> usize {
        self.lock()
            .users
            .iter()
            .filter(|user| user.username().as_ref() == username)
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn find(&self, username: &Username) -> Option<&User> {
        self.users.iter().find(|user| user.username() == username)
    }

    fn insert(&mut self, user: &NewUser) -> User {
        self.next_id += 1;
        let stored = User::new(
            UserId::new(self.next_id),
            user.username.clone(),
            user.password.clone(),
            user.is_admin,
        );
        self.users.push(stored.clone());
        stored
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().find(username).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if state.find(&user.username).is_some() {
            return Err(UserPersistenceError::duplicate_username(
                user.username.as_ref(),
            ));
        }
        Ok(state.insert(user))
    }

    async fn create_if_absent(
        &self,
        user: &NewUser,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock();
        if state.find(&user.username).is_some() {
            return Ok(None);
        }
        Ok(Some(state.insert(user)))
    }
}
