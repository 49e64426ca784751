//! Route table accumulation and the one-shot build into a [`Router`].

use http::Method;
use tracing::{debug, warn};

use super::core::Router;
use super::error::BuildError;
use super::radix::RadixTree;
use super::segment::SEPARATOR;
use crate::runtime_config::RouterConfig;

/// A registered route: method, path template and handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<H> {
    method: Method,
    path: String,
    handler: H,
}

impl<H> Route<H> {
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Collects routes before building the immutable [`Router`]
///
/// Routes must be added in non-decreasing byte-wise order of their path
/// template. Once [`RouterBuilder::build`] has been called the builder is
/// finalized: further `add_route` and `build` calls fail with
/// [`BuildError::AlreadyFinalized`], even if the build itself failed.
///
/// ```rust
/// use fastrouter::router::RouterBuilder;
/// use http::Method;
///
/// let mut builder = RouterBuilder::new();
/// builder.add_route("GET", "/", "home").unwrap();
/// builder.add_route("GET", "/files/*", "files").unwrap();
/// builder.add_route("GET", "/users/:id", "user").unwrap();
/// let router = builder.build().unwrap();
///
/// let m = router.match_indexed(&Method::GET, "/files/css/site.css").unwrap();
/// assert_eq!(*m.handler, "files");
/// assert_eq!(m.get_path_param("*"), Some("css/site.css"));
/// ```
#[derive(Debug)]
pub struct RouterBuilder<H> {
    routes: Vec<Route<H>>,
    finalized: bool,
    config: RouterConfig,
}

impl<H> RouterBuilder<H> {
    /// Create an empty builder with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            routes: Vec::new(),
            finalized: false,
            config,
        }
    }

    /// Add a route.
    ///
    /// `method` is case-insensitive (`"get"` registers `GET`). `path` must
    /// not sort before the previously added path. Adding the same method and
    /// path twice is accepted; the later handler wins.
    pub fn add_route(
        &mut self,
        method: &str,
        path: impl Into<String>,
        handler: H,
    ) -> Result<(), BuildError> {
        if self.finalized {
            return Err(BuildError::AlreadyFinalized);
        }

        let path = path.into();
        if let Some(last) = self.routes.last() {
            if path < last.path {
                return Err(BuildError::OutOfOrder {
                    previous: last.path.clone(),
                    path,
                });
            }
        }

        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(|_| {
            BuildError::InvalidMethod {
                method: method.to_string(),
            }
        })?;

        debug!(method = %method, path = %path, "Route added");
        self.routes.push(Route {
            method,
            path,
            handler,
        });
        Ok(())
    }

    pub fn get(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("GET", path, handler)
    }

    pub fn post(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("POST", path, handler)
    }

    pub fn put(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("PUT", path, handler)
    }

    pub fn patch(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("PATCH", path, handler)
    }

    pub fn delete(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("DELETE", path, handler)
    }

    pub fn head(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("HEAD", path, handler)
    }

    pub fn options(&mut self, path: impl Into<String>, handler: H) -> Result<(), BuildError> {
        self.add_route("OPTIONS", path, handler)
    }

    /// Routes accumulated so far
    #[must_use]
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Build the immutable router.
    ///
    /// The accumulated routes are sorted by path once more (stable, so equal
    /// paths keep their registration order) and inserted into a fresh trie.
    /// Fails with [`BuildError::AlreadyFinalized`] on a second call, and with
    /// [`BuildError::ParamConflict`] or [`BuildError::WildcardNotLast`] when
    /// a template cannot be represented.
    pub fn build(&mut self) -> Result<Router<H>, BuildError> {
        if self.finalized {
            return Err(BuildError::AlreadyFinalized);
        }
        self.finalized = true;

        let mut routes = std::mem::take(&mut self.routes);
        routes.sort_by(|a, b| a.path.cmp(&b.path));

        let mut tree = RadixTree::new();
        let mut table: Vec<(Method, String)> = Vec::with_capacity(routes.len());

        for Route {
            method,
            path,
            handler,
        } in routes
        {
            match tree.insert(&path, method.clone(), handler) {
                Ok(None) => {
                    let pattern = if path.starts_with(SEPARATOR) {
                        path
                    } else {
                        format!("{SEPARATOR}{path}")
                    };
                    table.push((method, pattern));
                }
                Ok(Some(_)) => {
                    debug!(method = %method, path = %path, "Route handler replaced");
                }
                Err(err) => {
                    warn!(method = %method, path = %path, error = %err, "Route table build failed");
                    return Err(err);
                }
            }
        }

        Ok(Router::from_tree(tree, table, self.config))
    }
}

impl<H> Default for RouterBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
