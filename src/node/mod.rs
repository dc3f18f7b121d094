//! Polymorphic landmark tree nodes.
//!
//! The map is a tree of [`MapNode`]s: interior **group** nodes organize the
//! map into named regions, and typed leaves carry the actual geometry — a
//! point landmark with a Gaussian position belief, or a line feature. The
//! node kind is an explicit tagged variant, so distance, sampling and leaf
//! collection switch on [`NodeKind`] instead of downcasting.
//!
//! A group exclusively owns its children; dropping a group drops its whole
//! subtree. Captions are expected to be unique among siblings for path
//! scoping to behave deterministically, but this is not enforced.

pub(crate) mod path;

use nalgebra::Vector3;
use rand::Rng;

use crate::error::{Error, Result};
use crate::gaussian::Gaussian3;
use crate::line::LineFeature;

/// Payload of a tree node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Interior node that only organizes other nodes.
    Group(Vec<MapNode>),
    /// Point landmark with a Gaussian position belief.
    Landmark(Gaussian3),
    /// Line feature with endpoints and a height.
    Line(LineFeature),
}

/// A node in the landmark tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MapNode {
    caption: String,
    kind: NodeKind,
}

impl MapNode {
    /// Create an empty group node.
    pub fn group(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            kind: NodeKind::Group(Vec::new()),
        }
    }

    /// Create a point-landmark leaf.
    pub fn landmark(caption: impl Into<String>, gaussian: Gaussian3) -> Self {
        Self {
            caption: caption.into(),
            kind: NodeKind::Landmark(gaussian),
        }
    }

    /// Create a line-feature leaf.
    pub fn line(caption: impl Into<String>, line: LineFeature) -> Self {
        Self {
            caption: caption.into(),
            kind: NodeKind::Line(line),
        }
    }

    /// Caption of this node.
    #[inline]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Payload of this node.
    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node is a typed leaf (landmark or line).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, NodeKind::Group(_))
    }

    /// Children of this node. Leaves have none.
    #[inline]
    pub fn children(&self) -> &[MapNode] {
        match &self.kind {
            NodeKind::Group(children) => children,
            _ => &[],
        }
    }

    /// Number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Append a child to the end of the child sequence, taking ownership.
    ///
    /// Caption uniqueness among siblings is the caller's responsibility.
    ///
    /// # Errors
    /// Returns [`Error::Structure`] when called on a leaf node.
    pub fn add_child(&mut self, child: MapNode) -> Result<()> {
        match &mut self.kind {
            NodeKind::Group(children) => {
                children.push(child);
                Ok(())
            }
            _ => Err(Error::Structure(format!(
                "cannot add a child to leaf node {:?}",
                self.caption
            ))),
        }
    }

    /// Get a child by index.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] when the index is invalid.
    pub fn child(&self, index: usize) -> Result<&MapNode> {
        let children = self.children();
        children.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: children.len(),
        })
    }

    /// Remove and return the child at `index`.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] when the index is invalid; the
    /// child sequence is left untouched in that case.
    pub fn remove_child_at(&mut self, index: usize) -> Result<MapNode> {
        match &mut self.kind {
            NodeKind::Group(children) if index < children.len() => Ok(children.remove(index)),
            _ => Err(Error::IndexOutOfBounds {
                index,
                len: self.child_count(),
            }),
        }
    }

    /// Remove the first child equal to `node`.
    ///
    /// A silent no-op when no child matches (or when called on a leaf).
    pub fn remove_child(&mut self, node: &MapNode) {
        if let NodeKind::Group(children) = &mut self.kind {
            if let Some(pos) = children.iter().position(|c| c == node) {
                children.remove(pos);
            }
        }
    }

    /// Find the leaf nearest to `point` under the path-matched subtree.
    ///
    /// Point landmarks score by Mahalanobis distance, line features by
    /// point-to-segment distance. The winner is the candidate with the
    /// **minimum** score; `None` is returned when the path matches nothing.
    /// Once recursion reaches a leaf the remaining path is ignored.
    pub fn nearest(&self, path: &str, point: &Vector3<f64>) -> Option<(&MapNode, f64)> {
        match &self.kind {
            NodeKind::Landmark(gaussian) => Some((self, gaussian.mahalanobis(point))),
            NodeKind::Line(line) => Some((self, line.distance_to_point(point))),
            NodeKind::Group(children) => {
                let (head, rest) = path::split_head(path);
                let mut best: Option<(&MapNode, f64)> = None;
                for child in children {
                    if !path::matches(child.caption(), head) {
                        continue;
                    }
                    if let Some((node, score)) = child.nearest(rest, point) {
                        let better = match best {
                            Some((_, best_score)) => score < best_score,
                            None => true,
                        };
                        if better {
                            best = Some((node, score));
                        }
                    }
                }
                best
            }
        }
    }

    /// Collect every typed leaf under the path-matched subtree.
    ///
    /// Traversal is depth-first in child order; group nodes are never
    /// collected, only landmark and line leaves.
    pub fn leaves(&self, path: &str) -> Vec<&MapNode> {
        let mut out = Vec::new();
        self.collect_leaves(path, &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, path: &str, out: &mut Vec<&'a MapNode>) {
        if let NodeKind::Group(children) = &self.kind {
            let (head, rest) = path::split_head(path);
            for child in children {
                if !path::matches(child.caption(), head) {
                    continue;
                }
                match &child.kind {
                    NodeKind::Group(_) => child.collect_leaves(rest, out),
                    _ => out.push(child),
                }
            }
        }
    }

    /// Draw a position sample from a leaf's distribution.
    ///
    /// Landmarks sample their Gaussian, lines sample uniformly along the
    /// segment. Groups have no distribution and return `None`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vector3<f64>> {
        match &self.kind {
            NodeKind::Group(_) => None,
            NodeKind::Landmark(gaussian) => Some(gaussian.draw(rng)),
            NodeKind::Line(line) => Some(line.draw(rng)),
        }
    }
}
