//! Path parameter bindings and their reuse pool.
//!
//! # Hot path
//!
//! Bindings are stored inline in a `SmallVec`, so a match with up to
//! [`MAX_INLINE_PARAMS`] captures never touches the heap for the container.
//! Parameter names are `Arc<str>` handles shared with the route tree; only the
//! captured values are allocated per request.
//!
//! The [`ParamPool`] recycles containers between requests. Callers that got a
//! pooled container from [`Router::fast_match`](super::Router::fast_match) hand
//! it back with [`ParamPool::release`] once they are done reading it.

use crossbeam_queue::ArrayQueue;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of path parameters before heap allocation.
/// Most REST APIs have ≤4 path params (e.g., /users/:id/posts/:postId).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Default number of idle containers kept by a [`ParamPool`]
pub const DEFAULT_POOL_CAPACITY: usize = 256;

/// Parameter bindings captured by a successful match.
///
/// Behaves as a map from parameter name (or `*` for wildcard captures) to the
/// captured value. Entries keep capture order; if a template reuses a name at
/// two depths, lookups return the deepest capture ("last write wins").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Remove all bindings, keeping any spilled heap capacity
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the bindings have outgrown the inline buffer
    #[must_use]
    pub fn spilled(&self) -> bool {
        self.entries.spilled()
    }

    /// Copy into an owned `HashMap`.
    /// Note: This allocates - use [`Params::get`] in hot paths instead
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Undo-log mark used for backtracking
    #[inline]
    pub(crate) fn mark(&self) -> usize {
        self.entries.len()
    }

    /// Roll back to a previous [`Params::mark`]
    #[inline]
    pub(crate) fn rollback(&mut self, mark: usize) {
        self.entries.truncate(mark);
    }

    #[inline]
    pub(crate) fn push(&mut self, name: &Arc<str>, value: &str) {
        self.entries.push((Arc::clone(name), value.to_owned()));
    }

    #[inline]
    pub(crate) fn push_owned(&mut self, name: &Arc<str>, value: String) {
        self.entries.push((Arc::clone(name), value));
    }
}

/// Lock-free bounded pool of reusable [`Params`] containers.
///
/// `acquire` always returns an empty container; `release` clears it and keeps
/// it for the next caller unless the pool already holds `capacity` idle
/// containers, in which case it is dropped. Both sides are a single
/// `ArrayQueue` pop or push, so concurrent matches never wait on each other.
/// A capacity of zero disables recycling.
#[derive(Debug)]
pub struct ParamPool {
    free: Option<ArrayQueue<Params>>,
    capacity: usize,
}

impl ParamPool {
    /// Create a pool keeping at most `capacity` idle containers
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            free: (capacity > 0).then(|| ArrayQueue::new(capacity)),
            capacity,
        }
    }

    /// Take an empty container, recycled when one is available
    #[must_use]
    pub fn acquire(&self) -> Params {
        self.free
            .as_ref()
            .and_then(ArrayQueue::pop)
            .unwrap_or_default()
    }

    /// Return a container to the pool.
    ///
    /// The container is cleared before it is recycled; its contents must not
    /// be relied on after this call.
    pub fn release(&self, mut params: Params) {
        let Some(free) = &self.free else {
            return;
        };
        params.clear();
        // Full pool: the container is dropped
        free.push(params).ok();
    }

    /// Number of idle containers currently held
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.as_ref().map_or(0, ArrayQueue::len)
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ParamPool {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_CAPACITY)
    }
}
