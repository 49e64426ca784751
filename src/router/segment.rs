//! Path segment classification
//!
//! Route templates use `:name` for a named parameter and a lone `*` for a
//! catch-all that claims the rest of the path. Everything else is literal text.

/// Prefix marking a named parameter segment (e.g. `:id`)
pub const PARAM_MARKER: char = ':';

/// Segment that captures the remaining path
pub const WILDCARD_MARKER: &str = "*";

/// Binding key used for wildcard captures
pub const WILDCARD_KEY: &str = "*";

/// Path separator
pub const SEPARATOR: char = '/';

/// Kind of a single route template segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Exact text match
    Literal(&'a str),
    /// Named parameter capturing one segment
    Param(&'a str),
    /// Captures the entire remaining path
    Wildcard,
}

impl<'a> Segment<'a> {
    /// Classify a template segment.
    ///
    /// A bare `:` has no name and is kept as literal text.
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        if segment == WILDCARD_MARKER {
            return Segment::Wildcard;
        }
        match segment.strip_prefix(PARAM_MARKER) {
            Some(name) if !name.is_empty() => Segment::Param(name),
            _ => Segment::Literal(segment),
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }
}

/// Strip the leading separator and return the remaining path, or `None` for
/// the root path.
///
/// `"/"` and `""` both mean "no segments". Empty segments elsewhere are kept,
/// so `"/files/"` yields `Some("files/")`, i.e. segments `["files", ""]`.
#[inline]
#[must_use]
pub fn segments_of(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(SEPARATOR).unwrap_or(path);
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Split a path into its segments (leading separator ignored, empty segments
/// preserved, root path yields nothing).
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    segments_of(path)
        .into_iter()
        .flat_map(|rest| rest.split(SEPARATOR))
}

/// Whether a route template contains any parameter or wildcard segment.
#[must_use]
pub fn has_dynamic_segment(path: &str) -> bool {
    split_path(path).any(|s| Segment::classify(s).is_dynamic())
}
