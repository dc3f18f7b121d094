//! Line feature type using endpoint representation.
//!
//! Line features model elongated structures in the basin (pipelines, wall
//! edges, mooring chains) as a 3D segment with an associated height.
//!
//! Distance and sampling over line features follow a fixed policy:
//!
//! - **Distance**: Euclidean point-to-segment distance, with the projection
//!   parameter clamped to `[0, 1]`.
//! - **Sampling**: a uniform point along the segment (`t ~ U[0, 1]`).

use nalgebra::Vector3;
use rand::Rng;

/// A 3D line feature defined by its endpoints and a height.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFeature {
    /// Start point of the segment.
    pub from: Vector3<f64>,
    /// End point of the segment.
    pub to: Vector3<f64>,
    /// Height of the structure above the segment (meters).
    pub height: f64,
}

impl LineFeature {
    /// Create a new line feature from two endpoints and a height.
    #[inline]
    pub fn new(from: Vector3<f64>, to: Vector3<f64>, height: f64) -> Self {
        Self { from, to, height }
    }

    /// Direction vector from start to end (not normalized).
    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        self.to - self.from
    }

    /// Length of the segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().norm()
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> Vector3<f64> {
        self.point_at(0.5)
    }

    /// Get a point along the segment at parameter `t`.
    ///
    /// - `t = 0`: returns the start point
    /// - `t = 1`: returns the end point
    #[inline]
    pub fn point_at(&self, t: f64) -> Vector3<f64> {
        self.from + self.direction() * t
    }

    /// Euclidean distance from `point` to the segment.
    ///
    /// Projects the point onto the infinite line, clamps the projection to
    /// the segment, and measures to the clamped point. Degenerate segments
    /// (coincident endpoints) fall back to point-to-point distance.
    pub fn distance_to_point(&self, point: &Vector3<f64>) -> f64 {
        let dir = self.direction();
        let len_sq = dir.norm_squared();
        if len_sq == 0.0 {
            return (point - self.from).norm();
        }
        let t = ((point - self.from).dot(&dir) / len_sq).clamp(0.0, 1.0);
        (point - self.point_at(t)).norm()
    }

    /// Draw a uniformly distributed point along the segment.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector3<f64> {
        self.point_at(rng.random_range(0.0..=1.0))
    }
}
