//! Metrics collection.
//!
//! # Metrics
//! - `hash_router_dispatch_total` (counter): handler invocations, by handler
//! - `hash_router_no_match_total` (counter): fragments no route matched
//! - `hash_router_dispatch_errors_total` (counter): failed dispatches seen by the host loop
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the embedding application picks the exporter
//! - Labels limited to handler name (bounded by the route table)

pub const DISPATCH_TOTAL: &str = "hash_router_dispatch_total";
pub const NO_MATCH_TOTAL: &str = "hash_router_no_match_total";
pub const DISPATCH_ERRORS_TOTAL: &str = "hash_router_dispatch_errors_total";

/// Register descriptions with whatever recorder is installed.
pub fn describe_metrics() {
    metrics::describe_counter!(DISPATCH_TOTAL, "Handler invocations by handler name");
    metrics::describe_counter!(NO_MATCH_TOTAL, "Fragments that matched no route");
    metrics::describe_counter!(DISPATCH_ERRORS_TOTAL, "Dispatch failures seen by the host loop");
}
