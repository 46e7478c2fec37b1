//! Account registration, authentication, and session actor resolution.
//!
//! Argon2 work runs on Tokio's blocking pool so request workers stay free
//! while a digest is computed.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Credentials, Error, NewUser, PasswordDigest, User, UserId};

/// Detail code attached to duplicate-username conflicts.
pub const DUPLICATE_USERNAME: &str = "duplicate_username";

/// Account use-cases backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a regular account.
    ///
    /// A taken username yields [`ErrorCode::Conflict`](crate::domain::ErrorCode)
    /// whether it is caught by the lookup or by the storage constraint.
    pub async fn register(&self, credentials: &Credentials) -> Result<User, Error> {
        let username = credentials.username();
        if self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(duplicate_username(username.as_ref()));
        }

        let digest = hash_password(credentials.password()).await?;
        let user = self
            .users
            .create(&NewUser::regular(username.clone(), digest))
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "registered account");
        Ok(user)
    }

    /// Check credentials and return the matching account.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller: both yield an unauthorised error.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login attempt for unknown username");
            return Err(invalid_credentials());
        };

        if verify_password(user.password().clone(), credentials.password()).await? {
            Ok(user)
        } else {
            debug!(user_id = %user.id(), "login attempt with wrong password");
            Err(invalid_credentials())
        }
    }

    /// Load the account a session refers to, if it still exists.
    pub async fn resolve(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

/// Hash off the async executor.
pub(crate) async fn hash_password(plain: &str) -> Result<PasswordDigest, Error> {
    let plain = Zeroizing::new(plain.to_owned());
    tokio::task::spawn_blocking(move || PasswordDigest::hash(&plain))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(err.to_string()))
}

async fn verify_password(digest: PasswordDigest, plain: &str) -> Result<bool, Error> {
    let plain = Zeroizing::new(plain.to_owned());
    tokio::task::spawn_blocking(move || digest.verify(&plain))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

fn duplicate_username(username: &str) -> Error {
    Error::conflict(format!("username {username} is already taken")).with_details(json!({
        "field": "username",
        "code": DUPLICATE_USERNAME,
    }))
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { username } => duplicate_username(&username),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::Username;
    use rstest::{fixture, rstest};

    fn stored_user(id: i32, name: &str, password: &str) -> User {
        User::new(
            UserId::new(id),
            Username::new(name).expect("valid username"),
            PasswordDigest::hash(password).expect("hash"),
            false,
        )
    }

    #[fixture]
    fn alice() -> Credentials {
        Credentials::try_from_parts("alice", "secret1").expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_hashed_password(alice: Credentials) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|new_user| {
            Ok(User::new(
                UserId::new(1),
                new_user.username.clone(),
                new_user.password.clone(),
                new_user.is_admin,
            ))
        });
        let service = AccountService::new(Arc::new(repo));

        let user = service.register(&alice).await.expect("registration succeeds");

        assert!(!user.is_admin());
        assert_ne!(user.password().as_phc(), "secret1");
        assert!(user.password().verify("secret1"));
        assert!(!user.password().verify("secret2"));
    }

    #[rstest]
    #[tokio::test]
    async fn register_rejects_existing_username(alice: Credentials) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user(1, "alice", "other"))));
        repo.expect_create().never();
        let service = AccountService::new(Arc::new(repo));

        let err = service.register(&alice).await.expect_err("duplicate rejected");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(
            err.details().and_then(|d| d.get("code")),
            Some(&json!(DUPLICATE_USERNAME))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_constraint_race_to_conflict(alice: Credentials) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(UserPersistenceError::duplicate_username("alice")));
        let service = AccountService::new(Arc::new(repo));

        let err = service.register(&alice).await.expect_err("race surfaces as conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case("secret1", true)]
    #[case("wrong", false)]
    #[tokio::test]
    async fn authenticate_checks_password(#[case] password: &str, #[case] accepted: bool) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user(4, "alice", "secret1"))));
        let service = AccountService::new(Arc::new(repo));
        let creds = Credentials::try_from_parts("alice", password).expect("valid credentials");

        match service.authenticate(&creds).await {
            Ok(user) => {
                assert!(accepted, "wrong password was accepted");
                assert_eq!(user.id(), UserId::new(4));
            }
            Err(err) => {
                assert!(!accepted, "correct password was rejected");
                assert_eq!(err.code(), ErrorCode::Unauthorized);
            }
        }
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_rejects_unknown_username(alice: Credentials) {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        let service = AccountService::new(Arc::new(repo));

        let err = service.authenticate(&alice).await.expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(UserPersistenceError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(UserPersistenceError::query("bad sql"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::duplicate_username("bob"), ErrorCode::Conflict)]
    fn persistence_errors_map_to_domain_codes(
        #[case] error: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_user_error(error).code(), expected);
    }
}
