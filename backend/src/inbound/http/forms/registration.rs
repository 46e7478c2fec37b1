//! Registration form.

use serde::Deserialize;
use zeroize::Zeroize;

use super::{FieldCheck, FieldErrors};
use crate::domain::user::{USERNAME_MAX, USERNAME_MIN};
use crate::domain::{Credentials, CredentialsError};

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 128;

/// Submitted `POST /register` body.
#[derive(Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password2: String,
}

impl RegistrationForm {
    /// Validate every field and build credentials on success.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = FieldCheck::new(&mut errors, "username", &self.username)
            .required()
            .length(USERNAME_MIN, USERNAME_MAX)
            .text();
        let password = FieldCheck::new(&mut errors, "password", &self.password)
            .required()
            .length(PASSWORD_MIN, PASSWORD_MAX)
            .text();
        FieldCheck::new(&mut errors, "password2", &self.password2)
            .required()
            .equal_to("password", &self.password);

        let (Some(username), Some(password)) = (username, password) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Credentials::try_from_parts(username, password).map_err(|error| {
            let mut errors = FieldErrors::new();
            match error {
                CredentialsError::Username(reason) => errors.add("username", reason.to_string()),
                CredentialsError::EmptyPassword => errors.add("password", super::REQUIRED),
            }
            errors
        })
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        self.password.zeroize();
        self.password2.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::forms::REQUIRED;
    use rstest::rstest;

    fn form(username: &str, password: &str, password2: &str) -> RegistrationForm {
        RegistrationForm {
            username: username.to_owned(),
            password: password.to_owned(),
            password2: password2.to_owned(),
        }
    }

    #[rstest]
    fn valid_submission_builds_credentials() {
        let credentials = form("alice", "secret1", "secret1")
            .validate()
            .expect("valid form");

        assert_eq!(credentials.username().as_ref(), "alice");
        assert_eq!(credentials.password(), "secret1");
    }

    #[rstest]
    fn every_field_is_reported() {
        let errors = form("", "abc", "xyz").validate().expect_err("invalid form");

        assert_eq!(errors.get("username"), [REQUIRED]);
        assert_eq!(
            errors.get("password"),
            ["Field must be between 6 and 128 characters long."]
        );
        assert_eq!(errors.get("password2"), ["Field must be equal to password."]);
    }

    #[rstest]
    fn overlong_username_is_rejected() {
        let long = "a".repeat(USERNAME_MAX + 1);

        let errors = form(&long, "secret1", "secret1")
            .validate()
            .expect_err("too long");

        assert_eq!(
            errors.get("username"),
            ["Field must be between 1 and 64 characters long."]
        );
    }

    #[rstest]
    fn omitted_confirmation_is_required() {
        let form: RegistrationForm = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "password": "secret1",
        }))
        .expect("partial form");

        let errors = form.validate().expect_err("no confirmation");

        assert_eq!(errors.get("password2"), [REQUIRED]);
    }

    #[rstest]
    fn mismatched_confirmation_alone_fails() {
        let errors = form("alice", "secret1", "secret2")
            .validate()
            .expect_err("mismatch");

        assert!(errors.get("username").is_empty());
        assert!(errors.get("password").is_empty());
        assert_eq!(errors.get("password2"), ["Field must be equal to password."]);
    }
}
