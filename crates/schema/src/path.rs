//! Error paths: where in a nested subject a failure occurred.
//!
//! A [`Path`] is an ordered sequence of object keys and array/tuple
//! indices locating a failure relative to the traversal root. The empty
//! path denotes the root itself.
//!
//! Paths are append-only values: the traversal engines never mutate a
//! path in place, they pass each child call a freshly extended copy via
//! [`Path::child_key`] / [`Path::child_index`]. No traversal state is
//! shared between siblings.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One step into a nested subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Descent through an object or record key.
    Key(String),
    /// Descent into an array or tuple position.
    Index(usize),
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_owned())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// Location of a failure within a nested subject.
///
/// Compound nesting is conventionally capped at seven levels by the
/// construction layer, so the inline capacity covers every path the
/// engine produces without a heap allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: SmallVec<[Segment; 8]>,
}

impl Path {
    /// The empty path: the traversal root itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments, root-first.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// A new path extended by an object/record key.
    #[must_use]
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    /// A new path extended by an array/tuple index.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// A new path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl fmt::Display for Path {
    /// Renders `$` for the root, then `key`/`.key`/`[index]` steps, e.g.
    /// `a.b[1]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("$");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, Segment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn root_is_empty() {
        let root = Path::root();
        assert!(root.is_root());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "$");
    }

    #[test]
    fn child_does_not_mutate_parent() {
        let parent = Path::root().child_key("a");
        let child = parent.child_index(3);
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
    }

    #[test]
    fn display_joins_keys_and_indices() {
        let path = Path::root().child_key("a").child_key("b").child_index(1);
        assert_eq!(path.to_string(), "a.b[1]");
    }

    #[test]
    fn display_index_first() {
        let path = Path::root().child_index(0).child_key("name");
        assert_eq!(path.to_string(), "[0].name");
    }

    #[test]
    fn serde_roundtrip() {
        let path = Path::root().child_key("xs").child_index(2);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn segment_serializes_untagged() {
        let json = serde_json::to_string(&Path::root().child_key("a").child_index(1)).unwrap();
        assert_eq!(json, "[\"a\",1]");
    }
}
