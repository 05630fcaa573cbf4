//! Built-in handlers driving a shared presentation state.
//!
//! These mirror the demo page the router was written for: visiting `#red`
//! or `#colors/:color` repaints the background, `#newRoute/cool/p:page/:cool`
//! switches page, and the empty fragment restores the home view.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::info;

use crate::handlers::{Args, HandlerRegistry};

pub const DEFAULT_BACKGROUND: &str = "white";
pub const HOME_TITLE: &str = "Home";

/// Visual properties a handler may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationState {
    pub background: String,
    pub title: String,
    pub page: Option<String>,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            title: HOME_TITLE.to_string(),
            page: None,
        }
    }
}

/// Presentation state shared between handlers and whoever renders it.
///
/// Readers take a snapshot with [`Presentation::current`]; handlers publish a
/// new state atomically.
#[derive(Debug, Default)]
pub struct Presentation {
    state: ArcSwap<PresentationState>,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Arc<PresentationState> {
        self.state.load_full()
    }

    /// Apply `f` to a copy of the current state and publish the result.
    pub fn update<F>(&self, f: F)
    where
        F: Fn(&mut PresentationState),
    {
        self.state.rcu(|current| {
            let mut next = PresentationState::clone(current);
            f(&mut next);
            next
        });
    }

    pub fn reset(&self) {
        self.state.store(Arc::new(PresentationState::default()));
    }
}

/// Register `home`, `color`, `red`, `blue` and `cool` against `presentation`.
pub fn register_defaults(registry: &mut HandlerRegistry, presentation: Arc<Presentation>) {
    let p = presentation.clone();
    registry.register("home", move |_: &Args| {
        p.reset();
        info!("Showing home");
    });

    let p = presentation.clone();
    registry.register("color", move |args: &Args| match args.get(0) {
        Some(color) => {
            p.update(|s| s.background = color.to_string());
            info!(color, "Background changed");
        }
        None => info!("No color captured, background unchanged"),
    });

    for color in ["red", "blue"] {
        let p = presentation.clone();
        registry.register(color, move |_: &Args| {
            p.update(|s| s.background = color.to_string());
            info!(color, "Background changed");
        });
    }

    let p = presentation;
    registry.register("cool", move |args: &Args| {
        let page = args.get(0).map(str::to_string);
        let cool = args.get(1).unwrap_or_default().to_string();
        p.update(|s| {
            s.page = page.clone();
            s.title = format!("Cool {cool}");
        });
        info!(page = ?page, cool = %cool, "Switched page");
    });
}
