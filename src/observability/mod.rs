//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (dispatch / no-match counters)
//!     → tracing.rs (one span per location change)
//!
//! Consumers:
//!     → Log output (stderr, pretty or JSON)
//!     → Metrics recorder installed by the embedding application
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Every dispatch is tagged with its event sequence number
//! - Metrics are cheap (no-op until a recorder is installed)

pub mod logging;
pub mod metrics;
pub mod tracing;
