//! Login credentials and registration requests.
//!
//! Handlers build these from form input once field validation has passed;
//! plain passwords are held in [`Zeroizing`] buffers until hashed or checked.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{UserValidationError, Username};

/// Rejected credential input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    Username(UserValidationError),
    EmptyPassword,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsError {}

impl From<UserValidationError> for CredentialsError {
    fn from(value: UserValidationError) -> Self {
        Self::Username(value)
    }
}

/// Username and password submitted at login or registration.
///
/// ## Invariants
/// - `username` satisfies [`Username`] validation.
/// - `password` is non-empty; surrounding whitespace is kept as typed.
///
/// # Examples
/// ```
/// use storefront::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" alice ", "secret1").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsError::Username(UserValidationError::EmptyUsername))]
    #[case("   ", "pw", CredentialsError::Username(UserValidationError::EmptyUsername))]
    #[case("user", "", CredentialsError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let err = Credentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", " secret ")]
    #[case("alice", "correct horse battery staple")]
    fn password_whitespace_is_preserved(#[case] username: &str, #[case] password: &str) {
        let creds = Credentials::try_from_parts(username, password).expect("valid inputs");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let creds = Credentials::try_from_parts("alice", "hunter22").expect("valid inputs");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter22"));
    }
}
