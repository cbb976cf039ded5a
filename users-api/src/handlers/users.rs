//! Request handling for the user resource
//!
//! [`UsersHandler`] owns the store and validator and turns each request
//! into store operations. It knows nothing about HTTP framing; routes
//! translate its outcomes into responses.

use serde::Serialize;

use super::dto::{UserDto, UserForCreation, UserForUpdate};
use super::negotiation::Representation;
use super::patch::PatchDocument;
use super::query::ListQuery;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::ids::UserId;
use crate::models::UserFields;
use crate::repository::{Page, UserRepository};
use crate::validation::UserValidator;

/// Result of a replace-or-create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upsert {
    /// No record had the id; one was created under it
    Created(UserDto),
    /// An existing record was overwritten
    Updated(UserDto),
}

/// Body of a list response
///
/// JSON carries a bare array; XML needs an element per user inside the
/// document root, `<users><user>..</user></users>`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UserList {
    Items(Vec<UserDto>),
    Envelope {
        #[serde(rename = "user")]
        users: Vec<UserDto>,
    },
}

impl UserList {
    pub fn for_representation(representation: Representation, users: Vec<UserDto>) -> Self {
        match representation {
            Representation::Json => Self::Items(users),
            Representation::Xml => Self::Envelope { users },
        }
    }
}

/// Parse a path segment as a user id
///
/// # Errors
///
/// [`Error::BadRequest`] when the segment is not a UUID.
pub fn parse_user_id(raw: &str) -> Result<UserId> {
    raw.parse()
        .map_err(|_| Error::BadRequest(format!("'{raw}' is not a valid user id")))
}

/// The user resource, wired to a store and a validator
#[derive(Debug)]
pub struct UsersHandler<R> {
    repository: R,
    validator: UserValidator,
    pagination: PaginationConfig,
}

impl<R: UserRepository> UsersHandler<R> {
    pub fn new(repository: R, validator: UserValidator, pagination: PaginationConfig) -> Self {
        Self {
            repository,
            validator,
            pagination,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn get(&self, id: UserId) -> Result<UserDto> {
        tracing::debug!(user_id = %id, "fetching user");
        let record = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))?;
        Ok(UserDto::from(&record))
    }

    /// Validate the login and store a new record
    pub async fn create(&self, input: UserForCreation) -> Result<UserDto> {
        let fields = UserFields::from(input);
        if let Err(errors) = self.validator.validate_creation(&fields) {
            tracing::warn!(%errors, "rejected user creation");
            return Err(errors.into());
        }

        let record = self.repository.insert(fields).await?;
        tracing::info!(user_id = %record.id(), "user created");
        Ok(UserDto::from(&record))
    }

    /// Replace every field of `id`, creating the record if absent
    pub async fn replace(&self, id: UserId, input: UserForUpdate) -> Result<Upsert> {
        if id.is_nil() {
            return Err(Error::BadRequest("user id must not be empty".into()));
        }

        let fields = UserFields::from(input);
        if let Err(errors) = self.validator.validate_update(&fields) {
            tracing::warn!(user_id = %id, %errors, "rejected user replacement");
            return Err(errors.into());
        }

        let (record, inserted) = self.repository.update_or_insert(id, fields).await?;
        let dto = UserDto::from(&record);
        if inserted {
            tracing::info!(user_id = %id, "user created by replace");
            Ok(Upsert::Created(dto))
        } else {
            tracing::info!(user_id = %id, "user replaced");
            Ok(Upsert::Updated(dto))
        }
    }

    /// Apply `document` to a copy of the record and persist it only if the
    /// result passes validation
    pub async fn patch(&self, id: UserId, document: PatchDocument) -> Result<()> {
        let mut record = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        let mut patched = record.fields.clone();
        if let Err(errors) = document.apply_to(&mut patched) {
            tracing::warn!(user_id = %id, %errors, "patch document could not be applied");
            return Err(errors.into());
        }
        if let Err(errors) = self.validator.validate_update(&patched) {
            tracing::warn!(user_id = %id, %errors, "patched user failed validation");
            return Err(errors.into());
        }

        record.fields = patched;
        if !self.repository.update(record).await? {
            // Deleted between the lookup and the write
            return Err(not_found(&id));
        }

        tracing::info!(user_id = %id, operations = document.operations().len(), "user patched");
        Ok(())
    }

    pub async fn delete(&self, id: UserId) -> Result<()> {
        if !self.repository.delete(&id).await? {
            return Err(not_found(&id));
        }
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// A clamped page of users
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the requested page number lies past the
    /// last page. An empty collection still has a valid (empty) first page.
    pub async fn list(&self, query: ListQuery) -> Result<Page<UserDto>> {
        let page_number = query.page_number();
        let page_size = query.page_size(&self.pagination);

        let page = self.repository.get_page(page_number, page_size).await?;

        let last_page = page.total_pages.max(1);
        if query.requested_page() > i64::from(last_page) {
            tracing::debug!(
                requested = query.requested_page(),
                total_pages = page.total_pages,
                "page out of range"
            );
            return Err(Error::NotFound(format!(
                "page {} does not exist; there are {} page(s)",
                query.requested_page(),
                page.total_pages
            )));
        }

        tracing::debug!(
            page = page.current_page,
            size = page.page_size,
            total = page.total_count,
            "listing users"
        );
        Ok(page.map(|record| UserDto::from(&record)))
    }
}

fn not_found(id: &UserId) -> Error {
    Error::NotFound(format!("user {id} not found"))
}
