//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::handlers::UsersHandler;
use crate::repository::InMemoryUserRepository;
use crate::validation::UserValidator;

/// The user resource as served by this process
pub type UsersResource = UsersHandler<InMemoryUserRepository>;

/// Application state shared across handlers
///
/// Holds the single store instance; cloning the state shares it.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    users: Arc<UsersResource>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Create state with an empty store
    pub fn new(config: Config) -> Self {
        Self::builder().config(config).build()
    }

    /// Create a new builder for AppState
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the user resource handler
    pub fn users(&self) -> &UsersResource {
        &self.users
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.config.service.name)
            .finish_non_exhaustive()
    }
}

/// Builder for AppState
#[derive(Debug, Default)]
pub struct AppStateBuilder {
    config: Option<Config>,
    repository: Option<InMemoryUserRepository>,
}

impl AppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults to `Config::default()`)
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a pre-populated store instead of an empty one
    pub fn repository(mut self, repository: InMemoryUserRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Wire the store and validator into the user handler
    pub fn build(self) -> AppState {
        let config = self.config.unwrap_or_default();
        let users = UsersHandler::new(
            self.repository.unwrap_or_default(),
            UserValidator::new(),
            config.pagination.clone(),
        );

        AppState {
            config: Arc::new(config),
            users: Arc::new(users),
        }
    }
}
