//! Client-side navigation dispatcher.
//!
//! Maps a location fragment (`#colors/red`) to a registered handler,
//! extracting the parameters embedded in the fragment.
//!
//! ```
//! use hash_router::handlers::{Args, HandlerRegistry};
//! use hash_router::routing::Router;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("home", |_: &Args| {});
//! registry.register("color", |args: &Args| println!("color = {:?}", args.get(0)));
//!
//! let router = Router::builder()
//!     .route("", "home")
//!     .route("colors/:color", "color")
//!     .build(&registry)
//!     .unwrap();
//!
//! let m = router.dispatch("#colors/red").unwrap();
//! assert_eq!(m.handler_name, "color");
//! assert_eq!(m.args.get(0), Some("red"));
//! ```

pub mod config;
pub mod handlers;
pub mod host;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use handlers::{Args, Handler, HandlerRegistry};
pub use lifecycle::Shutdown;
pub use routing::{MatchResult, RouteEntry, RouteError, Router};
