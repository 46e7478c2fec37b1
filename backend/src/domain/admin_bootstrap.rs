//! First-run administrator provisioning.

use tracing::info;

use crate::domain::accounts::{hash_password, map_user_error};
use crate::domain::ports::UserRepository;
use crate::domain::{Error, NewUser, UserId, Username};

/// Username of the bootstrap administrator.
pub const ADMIN_USERNAME: &str = "admin";

/// What [`ensure_admin`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    /// The account was missing and has been created.
    Created(UserId),
    /// An account named `admin` already existed and was left unchanged.
    AlreadyPresent,
}

/// Guarantee an `admin` account exists.
///
/// The password is applied only when the account is created; an existing
/// account keeps its password and role. Safe to run on every start.
pub async fn ensure_admin(
    users: &dyn UserRepository,
    password: &str,
) -> Result<AdminBootstrap, Error> {
    let username = Username::new(ADMIN_USERNAME)
        .map_err(|err| Error::internal(format!("invalid admin username: {err}")))?;
    if users
        .find_by_username(&username)
        .await
        .map_err(map_user_error)?
        .is_some()
    {
        return Ok(AdminBootstrap::AlreadyPresent);
    }

    let digest = hash_password(password).await?;
    let created = users
        .create_if_absent(&NewUser::admin(username, digest))
        .await
        .map_err(map_user_error)?;

    Ok(match created {
        Some(user) => {
            info!(user_id = %user.id(), "created bootstrap administrator");
            AdminBootstrap::Created(user.id())
        }
        None => AdminBootstrap::AlreadyPresent,
    })
}
