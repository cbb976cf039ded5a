//! Repository trait definition
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) for async methods
//! without requiring `async_trait`.

use std::future::Future;

use super::error::RepositoryError;
use super::page::Page;
use crate::ids::UserId;
use crate::models::{UserFields, UserRecord};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage contract for user records
///
/// Every method must appear atomic with respect to every other call on the
/// same repository.
pub trait UserRepository: Send + Sync {
    /// Find a record by its identifier
    ///
    /// Returns `Ok(None)` when no record has that id.
    fn find_by_id(
        &self,
        id: &UserId,
    ) -> impl Future<Output = RepositoryResult<Option<UserRecord>>> + Send;

    /// Store a new record under a freshly generated identifier
    fn insert(&self, fields: UserFields) -> impl Future<Output = RepositoryResult<UserRecord>> + Send;

    /// Overwrite all fields of the record `id`, or create it under exactly
    /// that id when it does not exist
    ///
    /// The returned flag is `true` when a record was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidId`] for the nil id.
    fn update_or_insert(
        &self,
        id: UserId,
        fields: UserFields,
    ) -> impl Future<Output = RepositoryResult<(UserRecord, bool)>> + Send;

    /// Overwrite the fields of an existing record
    ///
    /// Callers verify existence first; if the record has disappeared in the
    /// meantime nothing is written and `false` is returned.
    fn update(&self, record: UserRecord) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Remove a record
    ///
    /// Returns `true` if a record was removed. Deleting an absent id is not
    /// an error.
    fn delete(&self, id: &UserId) -> impl Future<Output = RepositoryResult<bool>> + Send;

    /// Return the 1-based page `page_number` of `page_size` records in
    /// insertion order
    ///
    /// Pages past the end are returned empty, never as errors.
    fn get_page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> impl Future<Output = RepositoryResult<Page<UserRecord>>> + Send;

    /// Number of stored records
    fn count(&self) -> impl Future<Output = RepositoryResult<u64>> + Send;
}
