//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register handlers → Compile Router
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop reading location changes → Exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then handlers, then router
//! - Startup errors are fatal; nothing is dispatched from a broken table

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
