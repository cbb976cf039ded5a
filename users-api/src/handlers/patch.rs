//! JSON Patch (RFC 6902) documents over the editable user fields
//!
//! Only the three scalar fields can be addressed: `/login`, `/firstName`
//! and `/lastName`. Removing a field clears it to an empty string, which
//! the validator then reports as missing.
//!
//! ```rust
//! use users_api::handlers::PatchDocument;
//! use users_api::models::UserFields;
//!
//! let document: PatchDocument = serde_json::from_str(
//!     r#"[{"op": "replace", "path": "/firstName", "value": "Augusta"}]"#,
//! ).unwrap();
//!
//! let mut fields = UserFields::new("ada", "Ada", "Lovelace");
//! document.apply_to(&mut fields).unwrap();
//! assert_eq!(fields.first_name, "Augusta");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::UserFields;
use crate::validation::{ValidationErrors, FIRST_NAME_FIELD, LAST_NAME_FIELD, LOGIN_FIELD};

/// One patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

/// An ordered list of operations applied all-or-nothing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    /// Apply every operation to `target` in order
    ///
    /// On failure the error is keyed by the offending path and `target`
    /// is left untouched.
    pub fn apply_to(&self, target: &mut UserFields) -> Result<(), ValidationErrors> {
        let mut working = target.clone();
        for operation in &self.0 {
            operation.apply(&mut working)?;
        }
        *target = working;
        Ok(())
    }
}

impl PatchOperation {
    fn apply(&self, fields: &mut UserFields) -> Result<(), ValidationErrors> {
        match self {
            Self::Add { path, value } | Self::Replace { path, value } => {
                let field = Field::resolve(path)?;
                *field.slot(fields) = scalar(path, value)?;
            }
            Self::Remove { path } => {
                Field::resolve(path)?.slot(fields).clear();
            }
            Self::Move { from, path } => {
                let source = Field::resolve(from)?;
                let target = Field::resolve(path)?;
                if source != target {
                    let value = std::mem::take(source.slot(fields));
                    *target.slot(fields) = value;
                }
            }
            Self::Copy { from, path } => {
                let value = Field::resolve(from)?.slot(fields).clone();
                *Field::resolve(path)?.slot(fields) = value;
            }
            Self::Test { path, value } => {
                let field = Field::resolve(path)?;
                let expected = scalar(path, value)?;
                if *field.slot(fields) != expected {
                    return Err(path_error(
                        path,
                        format!("The current value does not match the test value '{expected}'."),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Login,
    FirstName,
    LastName,
}

impl Field {
    fn resolve(path: &str) -> Result<Self, ValidationErrors> {
        let name = path.strip_prefix('/').unwrap_or(path);
        if name.eq_ignore_ascii_case(LOGIN_FIELD) {
            Ok(Self::Login)
        } else if name.eq_ignore_ascii_case(FIRST_NAME_FIELD) {
            Ok(Self::FirstName)
        } else if name.eq_ignore_ascii_case(LAST_NAME_FIELD) {
            Ok(Self::LastName)
        } else {
            Err(path_error(path, format!("The target location '{path}' was not found.")))
        }
    }

    fn slot(self, fields: &mut UserFields) -> &mut String {
        match self {
            Self::Login => &mut fields.login,
            Self::FirstName => &mut fields.first_name,
            Self::LastName => &mut fields.last_name,
        }
    }
}

/// Text of a patch value; `null` clears the field
fn scalar(path: &str, value: &Value) -> Result<String, ValidationErrors> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => Err(path_error(
            path,
            format!("The value '{value}' is invalid for target location '{path}'."),
        )),
    }
}

fn path_error(path: &str, message: String) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.add(path, message);
    errors
}
