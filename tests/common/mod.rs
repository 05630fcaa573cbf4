//! Shared fixtures for integration tests.

use std::sync::{Arc, Mutex};

use hash_router::handlers::{Args, HandlerRegistry};
use hash_router::routing::Router;

/// One recorded handler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub handler: String,
    pub args: Vec<String>,
}

/// Invocations seen by [`recording_registry`] handlers, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Call> {
        self.calls.lock().unwrap().last().cloned()
    }
}

/// A registry whose handlers only record how they were called.
pub fn recording_registry(names: &[&str]) -> (HandlerRegistry, Recorder) {
    let recorder = Recorder::default();
    let mut registry = HandlerRegistry::new();
    for name in names {
        let calls = recorder.calls.clone();
        let handler = name.to_string();
        registry.register(*name, move |args: &Args| {
            calls.lock().unwrap().push(Call {
                handler: handler.clone(),
                args: args.as_slice().to_vec(),
            });
        });
    }
    (registry, recorder)
}

/// Build a router over `(pattern, handler)` pairs with recording handlers.
pub fn recording_router(routes: &[(&str, &str)]) -> (Router, Recorder) {
    let mut names: Vec<&str> = routes.iter().map(|(_, h)| *h).collect();
    names.sort_unstable();
    names.dedup();

    let (registry, recorder) = recording_registry(&names);
    let router = routes
        .iter()
        .fold(Router::builder(), |b, (pattern, handler)| b.route(*pattern, *handler))
        .build(&registry)
        .unwrap();
    (router, recorder)
}

pub fn call(handler: &str, args: &[&str]) -> Call {
    Call {
        handler: handler.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
    }
}
