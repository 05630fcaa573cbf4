//! Routing error definitions.

use thiserror::Error;

/// Errors produced while building a [`Router`](crate::routing::router::Router)
/// or dispatching a fragment through it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A non-empty fragment matched none of the compiled routes.
    #[error("no route matches fragment '{fragment}'")]
    NoMatchingRoute { fragment: String },

    /// A route references a handler that is not registered.
    #[error("route '{pattern}' references unknown handler '{handler}'")]
    UnknownHandler { pattern: String, handler: String },

    /// A pattern was rejected by strict validation or could not be compiled.
    #[error("malformed route pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    /// The route table has no entry for the empty (home) pattern.
    #[error("route table has no default route (empty pattern)")]
    MissingDefaultRoute,
}

impl RouteError {
    pub(crate) fn malformed(pattern: &str, reason: impl Into<String>) -> Self {
        Self::MalformedPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
