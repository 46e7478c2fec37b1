//! Login form.

use serde::Deserialize;
use zeroize::Zeroize;

use super::{FieldCheck, FieldErrors, REQUIRED};
use crate::domain::{Credentials, CredentialsError};

/// Submitted `POST /login` body.
#[derive(Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox; browsers omit it when unticked.
    #[serde(default)]
    pub remember_me: Option<String>,
}

/// Why a login submission produced no credentials.
#[derive(Debug)]
pub enum LoginRejection {
    /// Required fields were left blank.
    Fields(FieldErrors),
    /// The input can never name an account.
    InvalidCredentials,
}

impl LoginForm {
    /// Only presence is checked here; anything else is a failed sign-in.
    pub fn validate(&self) -> Result<Credentials, LoginRejection> {
        let mut errors = FieldErrors::new();
        let username = FieldCheck::new(&mut errors, "username", &self.username)
            .required()
            .text();
        let password = FieldCheck::new(&mut errors, "password", &self.password)
            .required()
            .text();
        let (Some(username), Some(password)) = (username, password) else {
            return Err(LoginRejection::Fields(errors));
        };
        Credentials::try_from_parts(username, password).map_err(|error| match error {
            CredentialsError::Username(_) => LoginRejection::InvalidCredentials,
            CredentialsError::EmptyPassword => {
                errors.add("password", REQUIRED);
                LoginRejection::Fields(errors)
            }
        })
    }

    /// Whether the remember-me box was ticked.
    pub fn remember(&self) -> bool {
        self.remember_me
            .as_deref()
            .is_some_and(|value| !matches!(value, "" | "0" | "false" | "off"))
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}
