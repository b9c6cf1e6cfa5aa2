//! Credential payloads and the fail-fast schema check that runs before any
//! external call.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Why a payload failed the schema check. Internal detail for logs; callers
/// only ever see the generic message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password shorter than {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("password confirmation does not match")]
    PasswordMismatch,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignUpCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn check_email(email: &str) -> Result<(), CredentialError> {
    if email.is_empty() {
        return Err(CredentialError::Missing("email"));
    }

    if !valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }

    Ok(())
}

fn check_password(password: &str) -> Result<(), CredentialError> {
    if password.is_empty() {
        return Err(CredentialError::Missing("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialError::PasswordTooShort);
    }

    Ok(())
}

impl SignInCredentials {
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }

    /// Schema check; must pass before any network or database call.
    pub fn validate(&self) -> Result<(), CredentialError> {
        check_email(&self.email)?;
        check_password(&self.password)
    }
}

impl SignUpCredentials {
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }

    /// Schema check; must pass before any network or database call.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.name.trim().is_empty() {
            return Err(CredentialError::Missing("name"));
        }

        check_email(&self.email)?;
        check_password(&self.password)?;

        if self.password != self.confirm_password {
            return Err(CredentialError::PasswordMismatch);
        }

        Ok(())
    }
}
