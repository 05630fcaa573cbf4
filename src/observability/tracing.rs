//! Span helpers.
//!
//! # Responsibilities
//! - Create one span per location change so every log line of a dispatch
//!   (match, handler output, failure) carries the same sequence number

use tracing::{info_span, Span};

/// Span covering the dispatch of one location change.
pub fn dispatch_span(seq: u64, fragment: &str) -> Span {
    info_span!("dispatch", seq, fragment = %fragment)
}
