//! Service assembly
//!
//! [`ServiceBuilder`] wires configuration, state, routes and middleware
//! into a [`UsersService`] ready to serve.
//!
//! ```rust,no_run
//! use users_api::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let service = ServiceBuilder::new()
//!         .with_config(Config::load()?)
//!         .build();
//!
//!     service.serve().await
//! }
//! ```

use axum::Router;

use crate::config::Config;
use crate::error::Result;
use crate::routes;
use crate::server::Server;
use crate::state::AppState;

/// Service builder with sensible defaults
///
/// All fields are optional:
/// - config: `Config::load()`, falling back to `Config::default()`
/// - state: an empty store built from the config
/// - tracing: initialized from the config unless disabled
pub struct ServiceBuilder {
    config: Option<Config>,
    state: Option<AppState>,
    enable_tracing: bool,
}

impl ServiceBuilder {
    /// Create a new service builder with defaults
    pub fn new() -> Self {
        Self {
            config: None,
            state: None,
            enable_tracing: true,
        }
    }

    /// Set the service configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Serve an existing state instead of a fresh store
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Leave the global tracing subscriber alone
    pub fn without_tracing(mut self) -> Self {
        self.enable_tracing = false;
        self
    }

    /// Build the service
    pub fn build(self) -> UsersService {
        let config = match (self.config, &self.state) {
            (Some(config), _) => config,
            (None, Some(state)) => state.config().clone(),
            (None, None) => Config::load().unwrap_or_else(|e| {
                eprintln!("Warning: Failed to load config: {}, using defaults", e);
                Config::default()
            }),
        };

        if self.enable_tracing {
            if let Err(e) = crate::observability::init_tracing(&config) {
                eprintln!("Warning: Failed to initialize tracing: {}", e);
            }
        }

        let state = self
            .state
            .unwrap_or_else(|| AppState::new(config.clone()));

        let server = Server::new(config);
        let router = server.apply_middleware(routes::router(state.clone()));

        UsersService {
            server,
            router,
            state,
        }
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired service
pub struct UsersService {
    server: Server,
    router: Router,
    state: AppState,
}

impl UsersService {
    /// The router with all routes and middleware applied
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until a shutdown signal arrives
    pub async fn serve(self) -> Result<()> {
        self.server.serve(self.router).await
    }
}
