//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → Router::new (compile + bind handlers)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is fixed for the process
//! - All fields have defaults to allow minimal configs
//! - Routes are a TOML array of tables so file order is match order
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, MatchingConfig, ObservabilityConfig, RouterConfig};
pub use validation::{validate_config, ValidationError};
