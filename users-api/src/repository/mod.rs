//! User store
//!
//! The store owns every user record. Handlers reach it only through the
//! [`UserRepository`] trait and never keep references to records between
//! calls.
//!
//! # Features
//!
//! - **CRUD**: point lookup, insert with a generated id, replace-or-insert
//!   under a caller-supplied id, update, idempotent delete
//! - **Paging**: [`Page`] slices in insertion order with pagination metadata
//! - **Atomicity**: [`InMemoryUserRepository`] serialises every operation
//!   behind a single lock
//!
//! # Example
//!
//! ```rust
//! use users_api::models::UserFields;
//! use users_api::repository::{InMemoryUserRepository, UserRepository};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> users_api::repository::RepositoryResult<()> {
//! let repo = InMemoryUserRepository::new();
//! let created = repo.insert(UserFields::new("ada", "Ada", "Lovelace")).await?;
//!
//! let found = repo.find_by_id(&created.id()).await?;
//! assert_eq!(found, Some(created));
//!
//! let page = repo.get_page(1, 10).await?;
//! assert_eq!(page.total_count, 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod page;
mod traits;

// Re-export all public types
pub use error::RepositoryError;
pub use memory::InMemoryUserRepository;
pub use page::Page;
pub use traits::{RepositoryResult, UserRepository};
