//! Router core module - hot path for request routing.
//!
//! # Allocation discipline
//!
//! This module is part of the request hot path. The following clippy lints
//! are denied to keep needless allocation out of it:
//!
//! - `clippy::inefficient_to_string` - Catches unnecessary allocations
//! - `clippy::format_push_string` - Prevents format! string building
//! - `clippy::unnecessary_to_owned` - Flags owned copies that could be borrows

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use http::Method;
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::params::{ParamPool, Params};
use super::radix::RadixTree;
use crate::runtime_config::RouterConfig;

/// Result of successfully matching a request to a route
///
/// Borrows the handler from the router; the router outlives every match.
#[derive(Debug, PartialEq, Eq)]
pub struct RouteMatch<'r, H> {
    /// The handler registered for the matched method and route
    pub handler: &'r H,
    /// Path parameters extracted from the URL (e.g., `:id` → `{"id": "123"}`,
    /// `*` → `{"*": "rest/of/path"}`)
    pub params: Params,
}

impl<'r, H> RouteMatch<'r, H> {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Split into handler and bindings
    #[must_use]
    pub fn into_parts(self) -> (&'r H, Params) {
        (self.handler, self.params)
    }
}

/// Shape of a built route trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouterStats {
    /// Number of trie nodes, root included
    pub node_count: usize,
    /// Number of registered (method, path) handlers
    pub route_count: usize,
    /// Depth of the deepest node (root is depth 0)
    pub max_depth: usize,
}

impl fmt::Display for RouterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} routes, max depth {}",
            self.node_count, self.route_count, self.max_depth
        )
    }
}

/// Immutable router produced by [`RouterBuilder::build`](super::RouterBuilder::build)
///
/// Matching never mutates the trie, so a `Router` can be shared across threads
/// (e.g. in an `Arc`) and matched concurrently without locking. The only shared
/// mutable state is the parameter pool, which is thread-safe.
///
/// # Matcher variants
///
/// | method | traversal | bindings |
/// |---|---|---|
/// | [`match_segments`](Router::match_segments) | pre-split segment slice | fresh |
/// | [`match_indexed`](Router::match_indexed) | byte offsets into the path | fresh |
/// | [`match_static`](Router::match_static) | literal edges only | none |
/// | [`fast_match`](Router::fast_match) | offsets, or static when the router has no dynamic routes | pooled |
/// | [`route`](Router::route) | offsets, with timing and logging | fresh |
///
/// All variants return the same handler and bindings for the same input
/// (`match_static` only on routers without dynamic routes).
pub struct Router<H> {
    tree: RadixTree<H>,
    /// Registered (method, pattern) pairs in build order, duplicates removed
    routes: Vec<(Method, String)>,
    has_dynamic: bool,
    pool: ParamPool,
    config: RouterConfig,
}

impl<H> Router<H> {
    pub(crate) fn from_tree(
        tree: RadixTree<H>,
        routes: Vec<(Method, String)>,
        config: RouterConfig,
    ) -> Self {
        let has_dynamic = tree.has_dynamic();
        let router = Self {
            tree,
            routes,
            has_dynamic,
            pool: ParamPool::new(config.param_pool_capacity),
            config,
        };

        let stats = router.stats();
        let routes_summary: Vec<String> = router
            .routes
            .iter()
            .take(10)
            .map(|(method, path)| format!("{method} {path}"))
            .collect();

        info!(
            routes_count = stats.route_count,
            node_count = stats.node_count,
            max_depth = stats.max_depth,
            has_dynamic_routes = has_dynamic,
            routes_summary = ?routes_summary,
            "Routing table loaded"
        );

        router
    }

    /// Match using a pre-split segment list
    #[must_use]
    pub fn match_segments(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let mut params = Params::new();
        let handler = self.tree.search_segments(method, path, &mut params)?;
        Some(RouteMatch { handler, params })
    }

    /// Match by walking byte offsets into `path`, without splitting it
    #[must_use]
    pub fn match_indexed(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let mut params = Params::new();
        let handler = self.tree.search_indexed(method, path, &mut params)?;
        Some(RouteMatch { handler, params })
    }

    /// Literal-only match; never binds parameters.
    ///
    /// Agrees with the full matchers whenever [`Router::has_dynamic_routes`]
    /// is `false`. On routers with dynamic routes it only finds static ones.
    #[must_use]
    pub fn match_static(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let handler = self.tree.search_static(method, path)?;
        Some(RouteMatch {
            handler,
            params: Params::new(),
        })
    }

    /// Match with pooled bindings.
    ///
    /// Routers without dynamic routes take the static path and never touch
    /// the pool. Otherwise a container is acquired from the pool; on a miss it
    /// goes straight back. On a hit the caller owns it and should hand it back
    /// with [`Router::release`] once the bindings have been consumed.
    #[must_use]
    pub fn fast_match(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        if !self.has_dynamic {
            return self.match_static(method, path);
        }

        let mut params = self.pool.acquire();
        match self.tree.search_indexed(method, path, &mut params) {
            Some(handler) => Some(RouteMatch { handler, params }),
            None => {
                self.pool.release(params);
                None
            }
        }
    }

    /// Return a match's bindings to the parameter pool
    #[inline]
    pub fn release(&self, route_match: RouteMatch<'_, H>) {
        self.pool.release(route_match.params);
    }

    /// Match an HTTP request to a route, with timing and logging
    ///
    /// This is the entry point for serving layers. It uses the offset-based
    /// matcher and logs at `debug` for hits and misses, and at `warn` when a
    /// match takes longer than the configured slow threshold.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fastrouter::router::RouterBuilder;
    /// use http::Method;
    ///
    /// let mut builder = RouterBuilder::new();
    /// builder.get("/users/:id", "get_user").unwrap();
    /// let router = builder.build().unwrap();
    ///
    /// let m = router.route(&Method::GET, "/users/123").unwrap();
    /// assert_eq!(*m.handler, "get_user");
    /// assert_eq!(m.get_path_param("id"), Some("123"));
    /// ```
    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let match_start = Instant::now();
        let result = self.match_indexed(method, path);
        let match_duration = match_start.elapsed();

        match &result {
            Some(route_match) => {
                if match_duration > self.config.slow_match_threshold {
                    warn!(
                        method = %method,
                        path = %path,
                        path_params = ?route_match.params,
                        duration_us = match_duration.as_micros(),
                        "Slow route matching detected"
                    );
                } else {
                    debug!(
                        method = %method,
                        path = %path,
                        path_params = ?route_match.params,
                        duration_us = match_duration.as_micros(),
                        "Route matched"
                    );
                }
            }
            None => {
                debug!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
            }
        }

        result
    }

    /// Whether any parameter or wildcard route is registered
    #[inline]
    #[must_use]
    pub fn has_dynamic_routes(&self) -> bool {
        self.has_dynamic
    }

    /// Shared pool backing [`Router::fast_match`]
    #[inline]
    #[must_use]
    pub fn params_pool(&self) -> &ParamPool {
        &self.pool
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Node count, route count and depth of the trie
    #[must_use]
    pub fn stats(&self) -> RouterStats {
        let counts = self.tree.counts();
        RouterStats {
            node_count: counts.nodes,
            route_count: counts.handlers,
            max_depth: counts.max_depth,
        }
    }

    /// Registered `(method, pattern)` pairs in build order
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes.iter().map(|(m, p)| (m, p.as_str()))
    }

    /// Handler registered for an exact route template (e.g. `/users/:id`)
    #[must_use]
    pub fn handler_for(&self, method: &Method, pattern: &str) -> Option<&H> {
        self.tree.find_template(method, pattern)
    }

    /// Get all registered path patterns, each listed once
    ///
    /// Useful for pre-registering paths in a metrics layer at startup.
    #[must_use]
    pub fn path_patterns(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = Vec::with_capacity(self.routes.len());
        for (_, path) in &self.routes {
            if !patterns.contains(&path.as_str()) {
                patterns.push(path);
            }
        }
        patterns
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("stats", &self.stats())
            .field("has_dynamic", &self.has_dynamic)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
