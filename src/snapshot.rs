//! Flattened environment snapshot for external presentation layers.
//!
//! Rendering and other downstream consumers never walk the landmark tree
//! directly. They request a [`MapSnapshot`]: the map-level bounding extent
//! and translation plus flat lists of landmark and line records. Snapshots
//! are recomputed on demand and never cached, so consumers must not assume
//! stability between calls. An empty landmark list is a valid snapshot.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Flat projection of a point-landmark leaf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    /// Caption of the source leaf.
    pub caption: String,
    /// Mean position of the landmark.
    pub mean: Vector3<f64>,
    /// Position covariance of the landmark.
    pub covariance: Matrix3<f64>,
}

/// Flat projection of a line-feature leaf.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Caption of the source leaf.
    pub caption: String,
    /// Start point of the segment.
    pub from: Vector3<f64>,
    /// End point of the segment.
    pub to: Vector3<f64>,
    /// Height of the structure above the segment (meters).
    pub height: f64,
}

/// Read-only projection of the landmark tree and map-level metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    /// Bounding extent of the map.
    pub limitations: Vector3<f64>,
    /// Rigid offset of the map's coordinate frame.
    pub translation: Vector3<f64>,
    /// All point landmarks, in depth-first tree order.
    pub landmarks: Vec<LandmarkRecord>,
    /// All line features, in depth-first tree order.
    pub lines: Vec<LineRecord>,
}
