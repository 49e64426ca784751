//! # fastrouter
//!
//! **fastrouter** is an HTTP request router built on a segment trie. Routes are
//! registered on a [`RouterBuilder`](router::RouterBuilder), compiled once into
//! an immutable [`Router`](router::Router), and then matched concurrently from
//! any number of threads.
//!
//! ## Overview
//!
//! Route templates are split on `/` into segments of three kinds:
//!
//! - literal segments (`users`) match exactly
//! - parameter segments (`:id`) match any single segment and bind it by name
//! - a trailing wildcard (`*`) matches everything that remains, bound as `*`
//!
//! At every level literals are tried before the parameter, and the parameter
//! before the wildcard. A branch that fails further down backs out and the next
//! kind is tried, so `/users/new` and `/users/:id` coexist.
//!
//! ## Architecture
//!
//! - **[`router`]** - segment classifier, trie, builder, matchers and the
//!   parameter pool
//! - **[`runtime_config`]** - environment-driven tuning (pool size, slow-match
//!   threshold)
//! - **[`logging`]** - `tracing-subscriber` setup for binaries
//! - **[`cli`]** - the `fastrouter` command: load a TOML manifest and query it
//!
//! ## Quick Start
//!
//! ```rust
//! use fastrouter::router::RouterBuilder;
//! use http::Method;
//!
//! let mut builder = RouterBuilder::new();
//! builder.get("/", "index").unwrap();
//! builder.get("/static/*", "assets").unwrap();
//! builder.get("/users/:id", "get_user").unwrap();
//! builder.get("/users/new", "new_user_form").unwrap();
//! let router = builder.build().unwrap();
//!
//! let m = router.route(&Method::GET, "/users/new").unwrap();
//! assert_eq!(*m.handler, "new_user_form");
//!
//! let m = router.route(&Method::GET, "/static/css/site.css").unwrap();
//! assert_eq!(m.get_path_param("*"), Some("css/site.css"));
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events only. Binaries install a subscriber with
//! [`logging::init_logging`].

pub mod cli;
pub mod logging;
pub mod router;
pub mod runtime_config;

pub use router::{BuildError, RouteMatch, Router, RouterBuilder};
