//! Stored user data

use crate::ids::UserId;

/// Mutable fields of a user record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub login: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserFields {
    pub fn new(
        login: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            login: login.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// A user held by the store.
///
/// The id is assigned when the record is created and is never reassigned;
/// only [`UserFields`] change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    pub fields: UserFields,
}

impl UserRecord {
    pub(crate) fn new(id: UserId, fields: UserFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// `"{lastName} {firstName}"`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.last_name, self.fields.first_name)
    }
}
