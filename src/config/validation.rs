//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the route table has a default (empty pattern) entry
//! - Detect duplicate patterns, which could never be reached
//! - Reject markers that would collide with pattern syntax
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Handler names are checked later, against the registry, by `Router::new`

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no route with an empty pattern (default route) is declared")]
    MissingDefaultRoute,

    #[error("pattern '{pattern}' is declared more than once (route #{index})")]
    DuplicatePattern { pattern: String, index: usize },

    #[error("route #{index} ('{pattern}') has an empty handler name")]
    EmptyHandler { pattern: String, index: usize },

    #[error("marker {0:?} is not usable (whitespace, '/' or ':')")]
    InvalidMarker(char),

    #[error("unknown log level '{0}'")]
    InvalidLogLevel(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a parsed configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.routes.iter().any(|r| r.is_default()) {
        errors.push(ValidationError::MissingDefaultRoute);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if !seen.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern {
                pattern: route.pattern.clone(),
                index,
            });
        }
        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler {
                pattern: route.pattern.clone(),
                index,
            });
        }
    }

    let marker = config.matching.marker;
    if marker.is_whitespace() || marker == '/' || marker == ':' {
        errors.push(ValidationError::InvalidMarker(marker));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
