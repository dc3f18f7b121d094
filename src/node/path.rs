//! Dotted caption paths for scoping tree queries.
//!
//! A path like `"basin.north.buoy"` scopes a search or leaf collection to a
//! subtree: at each tree level the first segment is matched against the
//! captions of the current group's children, and only matching children are
//! descended into. An empty segment is a wildcard, which is also what every
//! level sees once the path is exhausted, so a short path means "from here
//! down, unscoped".

/// Split a dotted path into its first segment and the remainder.
///
/// The remainder is empty when no dot is present.
#[inline]
pub(crate) fn split_head(path: &str) -> (&str, &str) {
    match path.find('.') {
        Some(dot) => (&path[..dot], &path[dot + 1..]),
        None => (path, ""),
    }
}

/// Whether a node captioned `caption` matches the path segment `head`.
///
/// An empty segment matches any caption.
#[inline]
pub(crate) fn matches(caption: &str, head: &str) -> bool {
    head.is_empty() || caption == head
}
