//! Resource handlers for the user collection
//!
//! Everything between the router and the store lives here:
//!
//! - **Handlers**: [`UsersHandler`] runs the get/create/replace/patch/
//!   delete/list state machines over any [`UserRepository`](crate::repository::UserRepository)
//! - **Input**: [`Payload`] decodes JSON or XML bodies, [`ListQuery`]
//!   clamps paging parameters, [`PatchDocument`] applies JSON Patch
//! - **Output**: [`Representation`] negotiates JSON or XML, [`LinkBuilder`]
//!   produces `Location` and `X-Pagination` links, and the response types
//!   set status codes and headers
//!
//! # Example
//!
//! ```rust
//! use users_api::config::PaginationConfig;
//! use users_api::handlers::{ListQuery, UserForCreation, UsersHandler};
//! use users_api::repository::InMemoryUserRepository;
//! use users_api::validation::UserValidator;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> users_api::Result<()> {
//! let users = UsersHandler::new(
//!     InMemoryUserRepository::new(),
//!     UserValidator::new(),
//!     PaginationConfig::default(),
//! );
//!
//! let created = users
//!     .create(UserForCreation {
//!         login: Some("grace".into()),
//!         first_name: Some("Grace".into()),
//!         last_name: Some("Hopper".into()),
//!     })
//!     .await?;
//! assert_eq!(created.full_name, "Hopper Grace");
//!
//! let page = users.list(ListQuery::default()).await?;
//! assert_eq!(page.total_count, 1);
//! # Ok(())
//! # }
//! ```

mod dto;
mod links;
mod negotiation;
mod patch;
mod payload;
mod query;
mod response;
mod users;

// Re-export all public types
pub use dto::{UserDto, UserForCreation, UserForUpdate};
pub use links::{LinkBuilder, PaginationHeader, PAGINATION_HEADER};
pub use negotiation::Representation;
pub use patch::{PatchDocument, PatchOperation};
pub use payload::Payload;
pub use query::ListQuery;
pub use response::{Created, Negotiated, NoContent, Paginated};
pub use users::{parse_user_id, Upsert, UserList, UsersHandler};
