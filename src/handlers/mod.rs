//! Handler surface.
//!
//! # Data Flow
//! ```text
//! startup:
//!     name → Arc<dyn Handler>   (HandlerRegistry::register)
//!     Router::new resolves every route's handler name once
//!
//! dispatch:
//!     MatchResult.args → Handler::call(&Args)
//! ```
//!
//! # Design Decisions
//! - Handlers are typed callables looked up at construction, never by name at dispatch
//! - Arguments are positional; a missing position reads as `None`, extras are ignored
//! - Handlers return nothing; their effects are external

pub mod presentation;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Captured route arguments, in left-to-right token order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Args(Vec<String>);

impl Args {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// Value at `index`, or `None` when the route captured fewer arguments.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for Args {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[&str; N]> for Args {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|s| s.to_string()).collect())
    }
}

/// A callable bound to a route.
pub trait Handler: Send + Sync {
    fn call(&self, args: &Args);
}

impl<F> Handler for F
where
    F: Fn(&Args) + Send + Sync,
{
    fn call(&self, args: &Args) {
        self(args)
    }
}

/// Mapping from handler name to callable.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under `name`, replacing any previous one.
    pub fn register<H>(&mut self, name: impl Into<String>, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        let name = name.into();
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            tracing::warn!(handler = %name, "Replacing previously registered handler");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
