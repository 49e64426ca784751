//! Segment trie for HTTP route matching
//!
//! Each node represents one path segment. A node owns:
//! - literal children keyed by their exact segment text,
//! - at most one parameter child (`:name`), capturing a single segment,
//! - at most one wildcard child (`*`), capturing the rest of the path,
//! - the handlers registered for the route ending at this node, keyed by method.
//!
//! Lookup is O(k) in the number of path segments for static routes; dynamic
//! routes backtrack when a literal branch fails deeper down, trying the
//! parameter branch and then the wildcard at each level.
//!
//! ## Matching priority
//!
//! At every depth a literal child is tried first, then the parameter child,
//! then the wildcard child. A failed branch leaves no bindings behind: the
//! parameter branch rolls back to its undo mark and the wildcard binds only
//! once its handler is known to exist.
//!
//! ## Traversal styles
//!
//! - [`RadixTree::search_segments`] walks a pre-split slice of segments.
//! - [`RadixTree::search_indexed`] walks the path string by byte offsets and
//!   never builds a segment list; wildcard captures are slices of the path.
//! - [`RadixTree::search_static`] follows literal edges only.
//!
//! All three agree on static tries, and the first two agree everywhere.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::BuildError;
use super::params::Params;
use super::segment::{segments_of, split_path, Segment, SEPARATOR, WILDCARD_KEY};

/// Node in the route trie
struct RadixNode<H> {
    /// Children matched by exact segment text
    literal_children: HashMap<Box<str>, RadixNode<H>>,
    /// Single parameter child; its `param_name` is canonical for this position
    param_child: Option<Box<RadixNode<H>>>,
    /// Single wildcard child; terminates the path
    wildcard_child: Option<Box<RadixNode<H>>>,
    /// Handlers for the route ending here, per HTTP method
    handlers: HashMap<Method, H>,
    /// Binding key for parameter (`id`) and wildcard (`*`) nodes
    param_name: Option<Arc<str>>,
}

impl<H> RadixNode<H> {
    fn new() -> Self {
        Self {
            literal_children: HashMap::new(),
            param_child: None,
            wildcard_child: None,
            handlers: HashMap::new(),
            param_name: None,
        }
    }

    fn new_param(name: &str) -> Self {
        Self {
            param_name: Some(Arc::from(name)),
            ..Self::new()
        }
    }

    fn new_wildcard() -> Self {
        Self {
            param_name: Some(Arc::from(WILDCARD_KEY)),
            ..Self::new()
        }
    }

    fn is_dynamic(&self) -> bool {
        self.param_child.is_some()
            || self.wildcard_child.is_some()
            || self.literal_children.values().any(RadixNode::is_dynamic)
    }

    fn children(&self) -> impl Iterator<Item = &RadixNode<H>> {
        self.literal_children
            .values()
            .chain(self.param_child.as_deref())
            .chain(self.wildcard_child.as_deref())
    }

    /// Wildcard match: bind the remaining path only when a handler exists
    #[inline]
    fn match_wildcard<'a>(
        &'a self,
        rest: &str,
        method: &Method,
        params: &mut Params,
    ) -> Option<&'a H> {
        let wild = self.wildcard_child.as_deref()?;
        let handler = wild.handlers.get(method)?;
        if let Some(name) = &wild.param_name {
            params.push(name, rest);
        }
        Some(handler)
    }

    fn search_segments<'a>(
        &'a self,
        segments: &[&str],
        method: &Method,
        params: &mut Params,
    ) -> Option<&'a H> {
        let Some((segment, remaining)) = segments.split_first() else {
            return self.handlers.get(method);
        };

        if let Some(child) = self.literal_children.get(*segment) {
            if let Some(handler) = child.search_segments(remaining, method, params) {
                return Some(handler);
            }
        }

        if let Some(child) = self.param_child.as_deref() {
            let mark = params.mark();
            if let Some(name) = &child.param_name {
                params.push(name, segment);
            }
            if let Some(handler) = child.search_segments(remaining, method, params) {
                return Some(handler);
            }
            // Backtrack
            params.rollback(mark);
        }

        if let Some(wild) = self.wildcard_child.as_deref() {
            let handler = wild.handlers.get(method)?;
            if let Some(name) = &wild.param_name {
                params.push_owned(name, segments.join("/"));
            }
            return Some(handler);
        }

        None
    }

    /// `path` is the request path without its leading separator; `start` is the
    /// byte offset of the current segment, `None` once every segment is consumed.
    fn search_indexed<'a>(
        &'a self,
        path: &str,
        start: Option<usize>,
        method: &Method,
        params: &mut Params,
    ) -> Option<&'a H> {
        let Some(start) = start else {
            return self.handlers.get(method);
        };

        let rest = &path[start..];
        let (end, next) = match rest.find(SEPARATOR) {
            Some(i) => (start + i, Some(start + i + 1)),
            None => (path.len(), None),
        };
        let segment = &path[start..end];

        if let Some(child) = self.literal_children.get(segment) {
            if let Some(handler) = child.search_indexed(path, next, method, params) {
                return Some(handler);
            }
        }

        if let Some(child) = self.param_child.as_deref() {
            let mark = params.mark();
            if let Some(name) = &child.param_name {
                params.push(name, segment);
            }
            if let Some(handler) = child.search_indexed(path, next, method, params) {
                return Some(handler);
            }
            // Backtrack
            params.rollback(mark);
        }

        self.match_wildcard(rest, method, params)
    }
}

/// Counters gathered by walking the trie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TreeCounts {
    pub nodes: usize,
    pub handlers: usize,
    pub max_depth: usize,
}

/// Route trie over segment text, generic over the handler payload
pub(crate) struct RadixTree<H> {
    root: RadixNode<H>,
}

impl<H> RadixTree<H> {
    pub(crate) fn new() -> Self {
        Self {
            root: RadixNode::new(),
        }
    }

    /// Insert a route, returning the handler it replaced, if any.
    ///
    /// Re-registering the same method and path overwrites the previous handler.
    pub(crate) fn insert(
        &mut self,
        path: &str,
        method: Method,
        handler: H,
    ) -> Result<Option<H>, BuildError> {
        let mut node = &mut self.root;
        let mut segments = split_path(path).peekable();

        while let Some(segment) = segments.next() {
            node = match Segment::classify(segment) {
                Segment::Literal(text) => node
                    .literal_children
                    .entry(Box::from(text))
                    .or_insert_with(RadixNode::new),
                Segment::Param(name) => {
                    let child = node
                        .param_child
                        .get_or_insert_with(|| Box::new(RadixNode::new_param(name)));
                    if let Some(existing) = child.param_name.as_deref() {
                        if existing != name {
                            return Err(BuildError::ParamConflict {
                                path: path.to_string(),
                                existing: existing.to_string(),
                                conflicting: name.to_string(),
                            });
                        }
                    }
                    child.as_mut()
                }
                Segment::Wildcard => {
                    if segments.peek().is_some() {
                        return Err(BuildError::WildcardNotLast {
                            path: path.to_string(),
                        });
                    }
                    node.wildcard_child
                        .get_or_insert_with(|| Box::new(RadixNode::new_wildcard()))
                        .as_mut()
                }
            };
        }

        Ok(node.handlers.insert(method, handler))
    }

    /// Match by walking a pre-split segment slice
    pub(crate) fn search_segments<'a>(
        &'a self,
        method: &Method,
        path: &str,
        params: &mut Params,
    ) -> Option<&'a H> {
        let segments: smallvec::SmallVec<[&str; 16]> = split_path(path).collect();
        self.root.search_segments(&segments, method, params)
    }

    /// Match by walking byte offsets into the path
    pub(crate) fn search_indexed<'a>(
        &'a self,
        method: &Method,
        path: &str,
        params: &mut Params,
    ) -> Option<&'a H> {
        match segments_of(path) {
            Some(rest) => self.root.search_indexed(rest, Some(0), method, params),
            None => self.root.handlers.get(method),
        }
    }

    /// Match following literal edges only; never binds parameters
    pub(crate) fn search_static<'a>(&'a self, method: &Method, path: &str) -> Option<&'a H> {
        let mut node = &self.root;
        let mut rest = segments_of(path);
        while let Some(remaining) = rest {
            let (segment, next) = match remaining.split_once(SEPARATOR) {
                Some((segment, next)) => (segment, Some(next)),
                None => (remaining, None),
            };
            node = node.literal_children.get(segment)?;
            rest = next;
        }
        node.handlers.get(method)
    }

    /// Look up the handler registered for a route template, following the
    /// template's own segment kinds rather than matching it as a request path.
    pub(crate) fn find_template<'a>(&'a self, method: &Method, template: &str) -> Option<&'a H> {
        let mut node = &self.root;
        for segment in split_path(template) {
            node = match Segment::classify(segment) {
                Segment::Literal(text) => node.literal_children.get(text)?,
                Segment::Param(name) => {
                    let child = node.param_child.as_deref()?;
                    if child.param_name.as_deref() != Some(name) {
                        return None;
                    }
                    child
                }
                Segment::Wildcard => node.wildcard_child.as_deref()?,
            };
        }
        node.handlers.get(method)
    }

    /// Whether any parameter or wildcard node exists
    pub(crate) fn has_dynamic(&self) -> bool {
        self.root.is_dynamic()
    }

    /// Count nodes, registered handlers and the deepest node (root is depth 0)
    pub(crate) fn counts(&self) -> TreeCounts {
        let mut counts = TreeCounts::default();
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            counts.nodes += 1;
            counts.handlers += node.handlers.len();
            counts.max_depth = counts.max_depth.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(routes: &[(Method, &str, &'static str)]) -> RadixTree<&'static str> {
        let mut tree = RadixTree::new();
        for (method, path, handler) in routes {
            tree.insert(path, method.clone(), *handler)
                .expect("insert route");
        }
        tree
    }

    fn lookup(
        tree: &RadixTree<&'static str>,
        method: Method,
        path: &str,
    ) -> Option<(&'static str, Params)> {
        let mut params = Params::new();
        let handler = tree.search_indexed(&method, path, &mut params)?;
        Some((*handler, params))
    }

    #[test]
    fn test_radix_tree_simple_route() {
        let tree = tree(&[(Method::GET, "/health", "health_check")]);

        let (handler, params) = lookup(&tree, Method::GET, "/health").unwrap();
        assert_eq!(handler, "health_check");
        assert!(params.is_empty());
    }

    #[test]
    fn test_radix_tree_with_parameter() {
        let tree = tree(&[(Method::GET, "/users/:id", "get_user")]);

        let (handler, params) = lookup(&tree, Method::GET, "/users/123").unwrap();
        assert_eq!(handler, "get_user");
        assert_eq!(params.get("id"), Some("123"));
    }

    #[test]
    fn test_radix_tree_multiple_parameters() {
        let tree = tree(&[(Method::GET, "/users/:user_id/posts/:post_id", "get_post")]);

        let (handler, params) = lookup(&tree, Method::GET, "/users/123/posts/456").unwrap();
        assert_eq!(handler, "get_post");
        assert_eq!(params.get("user_id"), Some("123"));
        assert_eq!(params.get("post_id"), Some("456"));
    }

    #[test]
    fn test_radix_tree_method_filtering() {
        let tree = tree(&[
            (Method::GET, "/items", "get_items"),
            (Method::POST, "/items", "create_item"),
        ]);

        assert_eq!(lookup(&tree, Method::GET, "/items").unwrap().0, "get_items");
        assert_eq!(lookup(&tree, Method::POST, "/items").unwrap().0, "create_item");
        assert!(lookup(&tree, Method::PUT, "/items").is_none());
    }

    #[test]
    fn test_radix_tree_no_match() {
        let tree = tree(&[(Method::GET, "/users/:id", "get_user")]);

        assert!(lookup(&tree, Method::GET, "/posts/123").is_none());
        assert!(lookup(&tree, Method::POST, "/users/123").is_none());
        assert!(lookup(&tree, Method::GET, "/users").is_none());
    }

    #[test]
    fn test_radix_tree_complex_paths() {
        let tree = tree(&[
            (Method::GET, "/users", "list_users"),
            (Method::GET, "/users/:id", "get_user"),
            (Method::GET, "/users/:id/posts", "get_user_posts"),
        ]);

        assert_eq!(lookup(&tree, Method::GET, "/users").unwrap().0, "list_users");
        assert_eq!(lookup(&tree, Method::GET, "/users/123").unwrap().0, "get_user");
        assert_eq!(
            lookup(&tree, Method::GET, "/users/123/posts").unwrap().0,
            "get_user_posts"
        );
    }

    #[test]
    fn test_radix_tree_rejects_different_param_names_same_position() {
        let mut tree = RadixTree::new();
        tree.insert("/users/:id/comments", Method::GET, "get_user_comments")
            .unwrap();

        let err = tree
            .insert("/users/:user_id/posts", Method::GET, "get_user_posts")
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::ParamConflict {
                path: "/users/:user_id/posts".to_string(),
                existing: "id".to_string(),
                conflicting: "user_id".to_string(),
            }
        );
    }

    #[test]
    fn test_radix_tree_rejects_wildcard_before_more_segments() {
        let mut tree: RadixTree<&str> = RadixTree::new();
        let err = tree.insert("/files/*/meta", Method::GET, "meta").unwrap_err();
        assert!(matches!(err, BuildError::WildcardNotLast { .. }));
    }

    #[test]
    fn test_radix_tree_insert_overwrites_handler() {
        let mut tree = RadixTree::new();
        assert_eq!(tree.insert("/a", Method::GET, "first").unwrap(), None);
        assert_eq!(tree.insert("/a", Method::GET, "second").unwrap(), Some("first"));
        assert_eq!(lookup(&tree, Method::GET, "/a").unwrap().0, "second");
    }

    #[test]
    fn test_radix_tree_literal_failure_backtracks_to_param() {
        let tree = tree(&[
            (Method::GET, "/users/admin/settings", "admin_settings"),
            (Method::GET, "/users/:id/profile", "profile"),
        ]);

        let (handler, params) = lookup(&tree, Method::GET, "/users/admin/profile").unwrap();
        assert_eq!(handler, "profile");
        assert_eq!(params.get("id"), Some("admin"));
    }

    #[test]
    fn test_radix_tree_failed_param_branch_leaves_no_bindings() {
        let tree = tree(&[
            (Method::GET, "/a/:x/b", "ab"),
            (Method::GET, "/a/*", "wild"),
        ]);

        let (handler, params) = lookup(&tree, Method::GET, "/a/1/c").unwrap();
        assert_eq!(handler, "wild");
        assert!(!params.contains_key("x"));
        assert_eq!(params.get("*"), Some("1/c"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_radix_tree_traversals_agree() {
        let tree = tree(&[
            (Method::GET, "/", "root"),
            (Method::GET, "/files/*", "files"),
            (Method::GET, "/files/specific.txt", "specific"),
            (Method::GET, "/users/:id", "user"),
            (Method::GET, "/users/:id/posts/:post_id", "post"),
        ]);

        for path in [
            "/",
            "",
            "/files/specific.txt",
            "/files/dir/file.txt",
            "/files/",
            "/files",
            "/users/7",
            "/users/7/posts/8",
            "/users/7/posts",
            "users/7",
        ] {
            let mut by_segments = Params::new();
            let mut by_offsets = Params::new();
            let a = tree.search_segments(&Method::GET, path, &mut by_segments);
            let b = tree.search_indexed(&Method::GET, path, &mut by_offsets);
            assert_eq!(a, b, "handler mismatch for {path}");
            assert_eq!(by_segments, by_offsets, "params mismatch for {path}");
        }
    }

    #[test]
    fn test_radix_tree_counts() {
        let tree = tree(&[
            (Method::GET, "/", "root"),
            (Method::GET, "/api/posts", "posts"),
            (Method::GET, "/api/users", "users"),
            (Method::POST, "/api/users", "create_user"),
            (Method::GET, "/api/users/:id", "user"),
        ]);

        let counts = tree.counts();
        // root, api, posts, users, :id
        assert_eq!(counts.nodes, 5);
        assert_eq!(counts.handlers, 5);
        assert_eq!(counts.max_depth, 3);
        assert!(tree.has_dynamic());
    }
}
