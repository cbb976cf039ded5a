//! Field rules for submitted user data
//!
//! Every rule is evaluated independently and all violations are collected,
//! so a client sees every problem with a submission in one response.
//!
//! ```rust
//! use users_api::models::UserFields;
//! use users_api::validation::UserValidator;
//!
//! let validator = UserValidator::new();
//! let errors = validator
//!     .validate_update(&UserFields::new("bad login!", "", "Hopper"))
//!     .unwrap_err();
//!
//! assert!(errors.contains("login"));
//! assert!(errors.contains("firstName"));
//! assert!(!errors.contains("lastName"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::UserFields;

pub const LOGIN_FIELD: &str = "login";
pub const FIRST_NAME_FIELD: &str = "firstName";
pub const LAST_NAME_FIELD: &str = "lastName";

const LOGIN_REQUIRED: &str = "Login is required.";
const LOGIN_CHARSET: &str = "Login may contain only letters and digits.";
const FIRST_NAME_REQUIRED: &str = "First name is required.";
const LAST_NAME_REQUIRED: &str = "Last name is required.";

/// Accumulated field errors, keyed by the wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Record a message against `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages recorded against `field`
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() {
            Err(self)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Rule sets for the create and update paths
///
/// Creation checks the login only; full and partial updates check all
/// three fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserValidator;

impl UserValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_creation(&self, fields: &UserFields) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_login(&fields.login, &mut errors);
        errors.into_result()
    }

    pub fn validate_update(&self, fields: &UserFields) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_login(&fields.login, &mut errors);
        check_required(&fields.first_name, FIRST_NAME_FIELD, FIRST_NAME_REQUIRED, &mut errors);
        check_required(&fields.last_name, LAST_NAME_FIELD, LAST_NAME_REQUIRED, &mut errors);
        errors.into_result()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_login(login: &str, errors: &mut ValidationErrors) {
    if is_blank(login) {
        errors.add(LOGIN_FIELD, LOGIN_REQUIRED);
    } else if !login.chars().all(char::is_alphanumeric) {
        errors.add(LOGIN_FIELD, LOGIN_CHARSET);
    }
}

fn check_required(value: &str, field: &str, message: &str, errors: &mut ValidationErrors) {
    if is_blank(value) {
        errors.add(field, message);
    }
}
