//! Fragment resolution and dispatch.
//!
//! # Responsibilities
//! - Hold the compiled route table and the resolved handlers
//! - Strip the location marker from incoming fragments
//! - Resolve a fragment to a route plus captured arguments
//! - Invoke the resolved handler
//!
//! # Design Decisions
//! - Immutable after construction (no locks on the dispatch path)
//! - Empty fragment goes straight to the default route, no regex evaluated
//! - First match wins, in declaration order
//! - Explicit `NoMatchingRoute` rather than a silent no-op

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::handlers::{Args, Handler, HandlerRegistry};
use crate::observability::metrics::{DISPATCH_TOTAL, NO_MATCH_TOTAL};
use crate::routing::compiler::{compile, CompileOptions, CompiledRoute, RouteEntry};
use crate::routing::error::RouteError;

/// Marker conventionally preceding the fragment in a location.
pub const DEFAULT_MARKER: char = '#';

/// Outcome of resolving a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub handler_name: String,
    pub pattern: String,
    pub args: Args,
}

/// Remove a single leading `marker` from `fragment`, if present.
pub fn strip_marker(fragment: &str, marker: char) -> &str {
    fragment.strip_prefix(marker).unwrap_or(fragment)
}

struct BoundRoute {
    route: CompiledRoute,
    handler: Arc<dyn Handler>,
}

/// Ordered route table bound to its handlers.
pub struct Router {
    routes: Vec<BoundRoute>,
    default_index: usize,
    marker: char,
    options: CompileOptions,
}

impl Router {
    /// Compile `entries` and bind each route to its handler in `registry`.
    ///
    /// Fails when a pattern is malformed (strict mode), when a handler name
    /// is not registered, or when no default (empty) route is declared.
    pub fn new(
        entries: &[RouteEntry],
        registry: &HandlerRegistry,
        options: CompileOptions,
    ) -> Result<Self, RouteError> {
        let compiled = compile(entries, &options)?;

        let routes = compiled
            .into_iter()
            .map(|route| -> Result<BoundRoute, RouteError> {
                let handler = registry.get(&route.handler_name).ok_or_else(|| RouteError::UnknownHandler {
                    pattern: route.pattern.clone(),
                    handler: route.handler_name.clone(),
                })?;
                Ok(BoundRoute { route, handler })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        // The first declaration of the empty pattern wins, like any other route.
        let default_index = routes
            .iter()
            .position(|b| b.route.is_default())
            .ok_or(RouteError::MissingDefaultRoute)?;

        info!(
            routes_count = routes.len(),
            default_handler = %routes[default_index].route.handler_name,
            match_mode = ?options.match_mode,
            capture_mode = ?options.capture_mode,
            "Route table compiled"
        );

        Ok(Self {
            routes,
            default_index,
            marker: DEFAULT_MARKER,
            options,
        })
    }

    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Use `marker` instead of `#` when stripping fragments.
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiled routes, in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter().map(|b| &b.route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Log every compiled route.
    pub fn dump_routes(&self) {
        for (idx, route) in self.routes().enumerate() {
            info!(
                index = idx,
                pattern = %route.pattern,
                handler = %route.handler_name,
                regex = route.matcher.as_ref().map(|m| m.as_str()).unwrap_or("<default>"),
                "Route"
            );
        }
    }

    fn find(&self, clean: &str) -> Option<(usize, Vec<String>)> {
        if clean.is_empty() {
            return Some((self.default_index, Vec::new()));
        }
        self.routes.iter().enumerate().find_map(|(idx, b)| {
            b.route
                .matcher
                .as_ref()
                .and_then(|m| m.captures(clean))
                .map(|args| (idx, args))
        })
    }

    fn lookup(&self, fragment: &str) -> Result<(usize, MatchResult), RouteError> {
        let clean = strip_marker(fragment, self.marker);
        debug!(fragment = %fragment, clean = %clean, "Route match attempt");

        let Some((idx, args)) = self.find(clean) else {
            warn!(fragment = %fragment, "No route matched");
            metrics::counter!(NO_MATCH_TOTAL).increment(1);
            return Err(RouteError::NoMatchingRoute {
                fragment: clean.to_string(),
            });
        };

        let route = &self.routes[idx].route;
        let result = MatchResult {
            handler_name: route.handler_name.clone(),
            pattern: route.pattern.clone(),
            args: Args::new(args),
        };
        Ok((idx, result))
    }

    /// Resolve `fragment` to a route without invoking anything.
    pub fn resolve(&self, fragment: &str) -> Result<MatchResult, RouteError> {
        self.lookup(fragment).map(|(_, result)| result)
    }

    /// Resolve `fragment` and invoke the matched handler with its arguments.
    ///
    /// Returns the match that was dispatched.
    pub fn dispatch(&self, fragment: &str) -> Result<MatchResult, RouteError> {
        let (idx, result) = self.lookup(fragment)?;

        info!(
            fragment = %fragment,
            handler = %result.handler_name,
            pattern = %result.pattern,
            args = ?result.args.as_slice(),
            "Route matched"
        );
        metrics::counter!(DISPATCH_TOTAL, "handler" => result.handler_name.clone()).increment(1);

        self.routes[idx].handler.call(&result.args);
        Ok(result)
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes().map(|r| r.pattern.as_str()).collect::<Vec<_>>())
            .field("marker", &self.marker)
            .field("options", &self.options)
            .finish()
    }
}

/// Fluent construction of a [`Router`].
#[derive(Debug, Clone, Default)]
pub struct RouterBuilder {
    entries: Vec<RouteEntry>,
    options: CompileOptions,
    marker: Option<char>,
}

impl RouterBuilder {
    /// Append a route; declaration order is match order.
    pub fn route(mut self, pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        self.entries.push(RouteEntry::new(pattern, handler));
        self
    }

    pub fn routes<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = RouteEntry>,
    {
        self.entries.extend(entries);
        self
    }

    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn marker(mut self, marker: char) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn build(self, registry: &HandlerRegistry) -> Result<Router, RouteError> {
        let router = Router::new(&self.entries, registry, self.options)?;
        Ok(match self.marker {
            Some(marker) => router.with_marker(marker),
            None => router,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::compiler::{CaptureMode, MatchMode};
    use std::sync::Mutex;

    type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

    fn recording_registry(names: &[&str]) -> (HandlerRegistry, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HandlerRegistry::new();
        for name in names {
            let calls = calls.clone();
            let label = name.to_string();
            registry.register(*name, move |args: &Args| {
                calls.lock().unwrap().push((label.clone(), args.as_slice().to_vec()));
            });
        }
        (registry, calls)
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("#colors/red", '#'), "colors/red");
        assert_eq!(strip_marker("colors/red", '#'), "colors/red");
        assert_eq!(strip_marker("##x", '#'), "#x");
        assert_eq!(strip_marker("#", '#'), "");
        assert_eq!(strip_marker("!x", '!'), "x");
    }

    #[test]
    fn test_empty_fragment_goes_to_default() {
        let (registry, calls) = recording_registry(&["home", "any"]);
        // A catch-all declared first must not shadow the default route.
        let router = Router::builder()
            .route(":anything", "any")
            .route("", "home")
            .build(&registry)
            .unwrap();

        let m = router.dispatch("#").unwrap();
        assert_eq!(m.handler_name, "home");
        assert!(m.args.is_empty());

        let m = router.dispatch("").unwrap();
        assert_eq!(m.handler_name, "home");
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let (registry, _) = recording_registry(&["home", "specific", "generic"]);
        let router = Router::builder()
            .route("", "home")
            .route("colors/red", "specific")
            .route("colors/:color", "generic")
            .build(&registry)
            .unwrap();

        assert_eq!(router.resolve("#colors/red").unwrap().handler_name, "specific");
        assert_eq!(router.resolve("#colors/blue").unwrap().handler_name, "generic");
    }

    #[test]
    fn test_no_matching_route() {
        let (registry, calls) = recording_registry(&["home"]);
        let router = Router::builder().route("", "home").build(&registry).unwrap();

        let err = router.dispatch("#unknown").unwrap_err();
        assert_eq!(
            err,
            RouteError::NoMatchingRoute {
                fragment: "unknown".to_string()
            }
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_handler_caught_at_construction() {
        let (registry, _) = recording_registry(&["home"]);
        let err = Router::builder()
            .route("", "home")
            .route("red", "paint")
            .build(&registry)
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::UnknownHandler {
                pattern: "red".to_string(),
                handler: "paint".to_string()
            }
        );
    }

    #[test]
    fn test_missing_default_route() {
        let (registry, _) = recording_registry(&["red"]);
        let err = Router::builder().route("red", "red").build(&registry).unwrap_err();
        assert_eq!(err, RouteError::MissingDefaultRoute);
    }

    #[test]
    fn test_dispatch_invokes_with_args() {
        let (registry, calls) = recording_registry(&["home", "cool"]);
        let router = Router::builder()
            .route("", "home")
            .route("newRoute/cool/p:page/:cool", "cool")
            .build(&registry)
            .unwrap();

        router.dispatch("#newRoute/cool/p3/yes").unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec![("cool".to_string(), vec!["3".to_string(), "yes".to_string()])]
        );
    }

    #[test]
    fn test_substring_mode() {
        let (registry, _) = recording_registry(&["home", "red"]);
        let router = Router::builder()
            .route("", "home")
            .route("red", "red")
            .options(CompileOptions {
                match_mode: MatchMode::Substring,
                capture_mode: CaptureMode::Greedy,
                strict: false,
            })
            .build(&registry)
            .unwrap();

        assert_eq!(router.resolve("#bored").unwrap().handler_name, "red");
    }

    #[test]
    fn test_custom_marker() {
        let (registry, _) = recording_registry(&["home", "red"]);
        let router = Router::builder()
            .route("", "home")
            .route("red", "red")
            .marker('!')
            .build(&registry)
            .unwrap();

        assert_eq!(router.marker(), '!');
        assert_eq!(router.resolve("!red").unwrap().handler_name, "red");
        assert!(router.resolve("#red").is_err());
    }

    #[test]
    fn test_resolve_does_not_invoke() {
        let (registry, calls) = recording_registry(&["home", "red"]);
        let router = Router::builder()
            .route("", "home")
            .route("red", "red")
            .build(&registry)
            .unwrap();

        router.resolve("#red").unwrap();
        assert!(calls.lock().unwrap().is_empty());
    }
}
