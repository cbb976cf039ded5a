//! # users-api
//!
//! REST service exposing CRUD and paginated listing over an in-memory
//! collection of users.
//!
//! ## Features
//!
//! - **Resource**: `GET`/`HEAD`/`PUT`/`PATCH`/`DELETE /users/{id}`,
//!   `GET`/`POST`/`OPTIONS /users`
//! - **Pagination**: clamped page size, `X-Pagination` metadata with sibling links
//! - **Partial updates**: JSON Patch documents re-validated before persisting
//! - **Content negotiation**: JSON by default, XML on request
//! - **Middleware stack**: request tracking, panic recovery, body size limits,
//!   compression, CORS, timeouts
//! - **Health checks**: liveness and readiness probes
//! - **Graceful shutdown**: SIGTERM and SIGINT handling
//!
//! ## Example
//!
//! ```rust,no_run
//! use users_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Wire state, routes and middleware; tracing is initialized here
//!     let service = ServiceBuilder::new().with_config(config).build();
//!
//!     // Run server
//!     service.serve().await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod service_builder;
pub mod state;
pub mod validation;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, LinksConfig, PaginationConfig};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        LinkBuilder, ListQuery, PatchDocument, PatchOperation, Representation, UserDto,
        UserForCreation, UserForUpdate, UsersHandler,
    };
    pub use crate::health::{health, readiness};
    pub use crate::ids::{MakeTypedRequestId, RequestId, UserId};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
    };
    pub use crate::models::{UserFields, UserRecord};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{InMemoryUserRepository, Page, RepositoryError, UserRepository};
    pub use crate::routes::router;
    pub use crate::server::Server;
    pub use crate::service_builder::{ServiceBuilder, UsersService};
    pub use crate::state::{AppState, AppStateBuilder};
    pub use crate::validation::{UserValidator, ValidationErrors};
}
