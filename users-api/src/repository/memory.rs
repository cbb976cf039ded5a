//! In-memory user store

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use super::error::RepositoryError;
use super::page::Page;
use super::traits::{RepositoryResult, UserRepository};
use crate::ids::UserId;
use crate::models::{UserFields, UserRecord};

/// Process-local store keeping records in insertion order
///
/// Records live in a map keyed by a monotonically increasing sequence
/// number, with a secondary id index. Replacing a record keeps its
/// original position.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    records: BTreeMap<u64, UserRecord>,
    index: HashMap<UserId, u64>,
}

impl Inner {
    fn push(&mut self, record: UserRecord) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(record.id(), seq);
        self.records.insert(seq, record);
    }

    fn get_mut(&mut self, id: &UserId) -> Option<&mut UserRecord> {
        let seq = self.index.get(id)?;
        self.records.get_mut(seq)
    }

    /// Fresh v4 id that is neither nil nor already taken
    fn fresh_id(&self) -> UserId {
        loop {
            let id = UserId::new();
            if !id.is_nil() && !self.index.contains_key(&id) {
                return id;
            }
        }
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> RepositoryResult<Option<UserRecord>> {
        let inner = self.inner.read().await;
        let record = inner
            .index
            .get(id)
            .and_then(|seq| inner.records.get(seq))
            .cloned();
        Ok(record)
    }

    async fn insert(&self, fields: UserFields) -> RepositoryResult<UserRecord> {
        let mut inner = self.inner.write().await;
        let record = UserRecord::new(inner.fresh_id(), fields);
        inner.push(record.clone());

        tracing::debug!(user_id = %record.id(), "user inserted");
        Ok(record)
    }

    async fn update_or_insert(
        &self,
        id: UserId,
        fields: UserFields,
    ) -> RepositoryResult<(UserRecord, bool)> {
        if id.is_nil() {
            return Err(RepositoryError::InvalidId(id.to_string()));
        }

        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.get_mut(&id) {
            existing.fields = fields;
            return Ok((existing.clone(), false));
        }

        let record = UserRecord::new(id, fields);
        inner.push(record.clone());

        tracing::debug!(user_id = %id, "user inserted under caller-supplied id");
        Ok((record, true))
    }

    async fn update(&self, record: UserRecord) -> RepositoryResult<bool> {
        let mut inner = self.inner.write().await;
        match inner.get_mut(&record.id()) {
            Some(existing) => {
                existing.fields = record.fields;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &UserId) -> RepositoryResult<bool> {
        let mut inner = self.inner.write().await;
        let Some(seq) = inner.index.remove(id) else {
            return Ok(false);
        };
        inner.records.remove(&seq);

        tracing::debug!(user_id = %id, "user deleted");
        Ok(true)
    }

    async fn get_page(&self, page_number: u32, page_size: u32) -> RepositoryResult<Page<UserRecord>> {
        let page_size = page_size.max(1);
        let inner = self.inner.read().await;
        let total = inner.records.len() as u64;

        let skip = usize::try_from(Page::<UserRecord>::offset(page_number, page_size))
            .unwrap_or(usize::MAX);
        let items = inner
            .records
            .values()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(Page::new(items, page_number, page_size, total))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.inner.read().await.records.len() as u64)
    }
}
