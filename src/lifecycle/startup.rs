//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Register handlers
//! - Compile the route table into a `Router`
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Without a config file the built-in demo table is used

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{load_config, ConfigError, RouterConfig};
use crate::handlers::presentation::{register_defaults, Presentation};
use crate::handlers::HandlerRegistry;
use crate::routing::{RouteError, Router};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route table error: {0}")]
    Route(#[from] RouteError),
}

/// Everything the host needs after startup.
#[derive(Debug)]
pub struct App {
    pub config: RouterConfig,
    pub router: Arc<Router>,
    pub presentation: Arc<Presentation>,
}

/// Load `path`, or fall back to the built-in demo configuration.
pub fn load(path: Option<&Path>) -> Result<RouterConfig, StartupError> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(RouterConfig::default()),
    }
}

/// Compile `config` against a registry populated with the built-in handlers.
pub fn build(config: RouterConfig) -> Result<App, StartupError> {
    let presentation = Arc::new(Presentation::new());
    let mut registry = HandlerRegistry::new();
    register_defaults(&mut registry, presentation.clone());

    let router = build_router(&config, &registry)?;
    Ok(App {
        config,
        router: Arc::new(router),
        presentation,
    })
}

/// Compile `config` against an arbitrary registry.
pub fn build_router(config: &RouterConfig, registry: &HandlerRegistry) -> Result<Router, RouteError> {
    let router = Router::new(&config.routes, registry, config.matching.compile)?;
    Ok(router.with_marker(config.matching.marker))
}
