//! # Router Module
//!
//! The router module provides path matching and route resolution: a segment
//! trie built once from an ordered route table, then matched concurrently.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Collecting routes in lexicographic path order ([`RouterBuilder`])
//! - Building an immutable segment trie from them ([`Router`])
//! - Matching incoming `(method, path)` pairs to handlers
//! - Extracting path parameters and wildcard captures ([`Params`])
//! - Recycling parameter containers across requests ([`ParamPool`])
//!
//! ## Route templates
//!
//! | segment | meaning | binding |
//! |---|---|---|
//! | `users` | literal, exact match | none |
//! | `:id` | parameter, matches one segment | `id` → segment |
//! | `*` | wildcard, final segment only, matches the rest | `*` → remaining path |
//!
//! At each depth a literal match wins over a parameter, which wins over the
//! wildcard. A literal branch that fails deeper down falls back to the
//! parameter branch, then to the wildcard.
//!
//! ## Example
//!
//! ```rust
//! use fastrouter::router::RouterBuilder;
//! use http::Method;
//!
//! let mut builder = RouterBuilder::new();
//! builder.get("/users/:id/posts/:post_id", "get_post").unwrap();
//! let router = builder.build().unwrap();
//!
//! if let Some(route_match) = router.route(&Method::GET, "/users/123/posts/456") {
//!     assert_eq!(*route_match.handler, "get_post");
//!     assert_eq!(route_match.get_path_param("id"), Some("123"));
//!     assert_eq!(route_match.get_path_param("post_id"), Some("456"));
//! }
//! ```
//!
//! ## Lifecycle
//!
//! ```text
//! RouterBuilder::add_route* ──build()──► Router ──match_*()/route()──► RouteMatch
//!                                          │
//!                                          └── ParamPool::acquire/release (fast_match)
//! ```

mod builder;
mod core;
mod error;
mod params;
mod radix;
pub mod segment;

pub use builder::{Route, RouterBuilder};
pub use self::core::{RouteMatch, Router, RouterStats};
pub use error::BuildError;
pub use params::{ParamPool, ParamVec, Params, DEFAULT_POOL_CAPACITY, MAX_INLINE_PARAMS};
