//! Wire representations of a user
//!
//! Conversions between these and [`UserRecord`]/[`UserFields`] are plain
//! field copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::UserId;
use crate::models::{UserFields, UserRecord};
use crate::validation::{FIRST_NAME_FIELD, LAST_NAME_FIELD, LOGIN_FIELD};

/// Write bodies decode through a map so that only an object (JSON) or an
/// element with children (XML) binds; positional arrays are rejected.
type FieldMap = HashMap<String, Option<String>>;

fn take(map: &mut FieldMap, key: &str) -> Option<String> {
    map.remove(key).flatten()
}

/// Read representation: `{id, login, fullName}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub login: String,
    /// `"{lastName} {firstName}"`
    pub full_name: String,
}

impl From<&UserRecord> for UserDto {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id(),
            login: record.fields.login.clone(),
            full_name: record.full_name(),
        }
    }
}

/// Body of `POST /users`
///
/// Missing fields bind as `None` and are stored as empty strings; the
/// validator decides whether that is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldMap")]
pub struct UserForCreation {
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<FieldMap> for UserForCreation {
    fn from(mut map: FieldMap) -> Self {
        Self {
            login: take(&mut map, LOGIN_FIELD),
            first_name: take(&mut map, FIRST_NAME_FIELD),
            last_name: take(&mut map, LAST_NAME_FIELD),
        }
    }
}

impl From<UserForCreation> for UserFields {
    fn from(input: UserForCreation) -> Self {
        UserFields::new(
            input.login.unwrap_or_default(),
            input.first_name.unwrap_or_default(),
            input.last_name.unwrap_or_default(),
        )
    }
}

/// Body of `PUT /users/{id}`; every field is replaced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FieldMap")]
pub struct UserForUpdate {
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<FieldMap> for UserForUpdate {
    fn from(mut map: FieldMap) -> Self {
        Self {
            login: take(&mut map, LOGIN_FIELD),
            first_name: take(&mut map, FIRST_NAME_FIELD),
            last_name: take(&mut map, LAST_NAME_FIELD),
        }
    }
}

impl From<UserForUpdate> for UserFields {
    fn from(input: UserForUpdate) -> Self {
        UserFields::new(
            input.login.unwrap_or_default(),
            input.first_name.unwrap_or_default(),
            input.last_name.unwrap_or_default(),
        )
    }
}
