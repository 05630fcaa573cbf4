//! Host event loop.
//!
//! # Data Flow
//! ```text
//! startup:           initial fragment ──┐
//! location changes:  LocationEvents  ───┼─→ Router::dispatch (serially)
//! shutdown:          Shutdown        ───┘   errors logged, loop continues
//! ```
//!
//! # Design Decisions
//! - One dispatch at a time; a change raised by a handler is queued behind it
//! - A failed dispatch never stops the loop
//! - Loop ends when every location handle is dropped or on shutdown

pub mod events;

pub use events::{
    location, spawn_line_source, spawn_stdin_source, spawn_thread_line_source, LocationChange, LocationEvents,
    LocationHandle,
};

use serde::Serialize;
use tracing::error;

use crate::lifecycle::shutdown::Shutdown;
use crate::observability::metrics::DISPATCH_ERRORS_TOTAL;
use crate::observability::tracing::dispatch_span;
use crate::routing::{MatchResult, RouteError, Router};

/// Counts kept by [`run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostSummary {
    pub dispatched: u64,
    pub failed: u64,
}

impl HostSummary {
    fn record(&mut self, outcome: &Result<MatchResult, RouteError>) {
        match outcome {
            Ok(_) => self.dispatched += 1,
            Err(_) => self.failed += 1,
        }
    }
}

/// Dispatch one fragment, logging a failure instead of propagating it.
pub fn dispatch_logged(router: &Router, seq: u64, fragment: &str) -> Result<MatchResult, RouteError> {
    let span = dispatch_span(seq, fragment);
    let _enter = span.enter();

    let outcome = router.dispatch(fragment);
    if let Err(e) = &outcome {
        error!(error = %e, "Dispatch failed");
        metrics::counter!(DISPATCH_ERRORS_TOTAL).increment(1);
    }
    outcome
}

/// Dispatch `initial`, then every change from `events`, until the events end
/// or `shutdown` fires.
pub async fn run(router: &Router, initial: &str, mut events: LocationEvents, shutdown: &Shutdown) -> HostSummary {
    let mut shutdown_rx = shutdown.subscribe();
    let mut summary = HostSummary::default();

    summary.record(&dispatch_logged(router, 0, initial));

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => {
                tracing::info!("Shutdown requested, leaving event loop");
                break;
            }
            change = events.next() => match change {
                Some(change) => summary.record(&dispatch_logged(router, change.seq, &change.fragment)),
                None => break,
            },
        }
    }

    tracing::info!(
        dispatched = summary.dispatched,
        failed = summary.failed,
        "Event loop finished"
    );
    summary
}
