use std::fmt;

/// Route table construction error
///
/// Returned by [`RouterBuilder::add_route`](super::RouterBuilder::add_route) and
/// [`RouterBuilder::build`](super::RouterBuilder::build). None of these are
/// retried internally; fix the route table and build again from scratch.
///
/// Ordering (`OutOfOrder`) and lifecycle (`AlreadyFinalized`) errors are the
/// core kinds. `InvalidMethod`, `ParamConflict` and `WildcardNotLast` are
/// stricter checks on top of them: such routes could never be matched as
/// written, so they are rejected instead of being accepted silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Route paths must be added in non-decreasing byte-wise order
    OutOfOrder {
        /// Path of the last accepted route
        previous: String,
        /// The rejected path
        path: String,
    },
    /// The builder has already produced a router
    AlreadyFinalized,
    /// The method is not a valid HTTP method token
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// Two routes use different parameter names at the same position
    ///
    /// e.g. `/users/:id` and `/users/:user_id/posts`. Only one parameter
    /// child exists per node, so one of the names would be silently lost.
    ParamConflict {
        /// Path of the route being inserted
        path: String,
        /// Parameter name already registered at this position
        existing: String,
        /// Parameter name the new route tried to use
        conflicting: String,
    },
    /// A `*` segment is followed by more segments
    WildcardNotLast {
        /// The rejected path
        path: String,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::OutOfOrder { previous, path } => {
                write!(
                    f,
                    "routes must be added in lexicographic order: '{}' comes before '{}'",
                    path, previous
                )
            }
            BuildError::AlreadyFinalized => write!(f, "router already built"),
            BuildError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method '{}'", method)
            }
            BuildError::ParamConflict {
                path,
                existing,
                conflicting,
            } => {
                write!(
                    f,
                    "route '{}' names parameter ':{}' where ':{}' is already registered",
                    path, conflicting, existing
                )
            }
            BuildError::WildcardNotLast { path } => {
                write!(f, "route '{}' has segments after the '*' wildcard", path)
            }
        }
    }
}

impl std::error::Error for BuildError {}
