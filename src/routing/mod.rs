//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteEntry[] (declaration order)
//!     → pattern.rs (tokenize literals and :params)
//!     → compiler.rs (one regex per pattern, default route left uncompiled)
//!     → router.rs (bind handlers, freeze as immutable Router)
//!
//! Dispatch (startup + every location change):
//!     "#colors/red"
//!     → strip marker → "colors/red"
//!     → empty? default route : first matching route
//!     → MatchResult { handler_name, args } or NoMatchingRoute
//!     → Handler::call(&args)
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - Deterministic: same fragment always resolves to the same route
//! - First match wins (declaration order, never hash order)
//! - Configuration errors surface at construction, not at first dispatch

pub mod compiler;
pub mod error;
pub mod pattern;
pub mod router;

pub use compiler::{CaptureMode, CompileOptions, CompiledPattern, CompiledRoute, MatchMode, RouteEntry};
pub use error::RouteError;
pub use router::{strip_marker, MatchResult, Router, RouterBuilder, DEFAULT_MARKER};
