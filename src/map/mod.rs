//! LandmarkMap: the main hierarchical landmark map.

mod yaml;

use nalgebra::Vector3;
use rand::Rng;

use crate::error::{Error, Result};
use crate::node::{MapNode, NodeKind};
use crate::snapshot::{LandmarkRecord, LineRecord, MapSnapshot};

/// Hierarchical landmark map for underwater localization.
///
/// Owns the root group of the landmark tree together with map-level
/// metadata: the bounding extent (`limitations`) and a rigid offset of the
/// map's coordinate frame (`translation`).
///
/// Maps are usually loaded from a YAML document (see
/// [`from_yaml_file`](Self::from_yaml_file)) and are immutable afterwards.
/// All queries are synchronous and read-only, so a constructed map can be
/// shared freely between readers.
///
/// # Example
///
/// ```rust
/// use varuna_map::LandmarkMap;
/// use nalgebra::Vector3;
///
/// let doc = "
/// metrics: [100.0, 50.0, 20.0]
/// reference: [0.0, 0.0, 0.0]
/// root:
///   basin:
///     mean: [1.0, 2.0, 3.0]
///     cov: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
///     caption: buoy
/// ";
/// let map = LandmarkMap::from_yaml_str(doc).unwrap();
///
/// let (node, distance) = map
///     .nearest("basin.buoy", &Vector3::new(1.0, 2.0, 3.0))
///     .unwrap();
/// assert_eq!(node.caption(), "buoy");
/// assert!(distance < 1e-9);
/// ```
pub struct LandmarkMap {
    root: MapNode,
    limitations: Vector3<f64>,
    translation: Vector3<f64>,
}

impl LandmarkMap {
    /// Create a map from a pre-built root node and map-level metadata.
    pub fn new(limitations: Vector3<f64>, translation: Vector3<f64>, root: MapNode) -> Self {
        Self {
            root,
            limitations,
            translation,
        }
    }

    /// Root group of the landmark tree.
    #[inline]
    pub fn root(&self) -> &MapNode {
        &self.root
    }

    /// Bounding extent of the map.
    #[inline]
    pub fn limitations(&self) -> Vector3<f64> {
        self.limitations
    }

    /// Rigid offset of the map's coordinate frame.
    #[inline]
    pub fn translation(&self) -> Vector3<f64> {
        self.translation
    }

    /// Find the leaf nearest to `point` under `path`.
    ///
    /// Delegates to the root node; see [`MapNode::nearest`] for the scoring
    /// and path semantics. Returns `None` when the path matches nothing.
    pub fn nearest(&self, path: &str, point: &Vector3<f64>) -> Option<(&MapNode, f64)> {
        self.root.nearest(path, point)
    }

    /// Collect every typed leaf under `path`, in depth-first child order.
    pub fn leaves(&self, path: &str) -> Vec<&MapNode> {
        self.root.leaves(path)
    }

    /// Draw `count` position samples from the landmarks under `path`.
    ///
    /// Each draw picks one point landmark uniformly at random (with
    /// replacement) and samples its Gaussian. Line features are not sampled.
    /// The random source is caller-supplied, so sampling is seedable and
    /// deterministic in tests.
    ///
    /// # Errors
    /// Returns [`Error::EmptyScope`] when `path` matches no point landmarks.
    pub fn draw_samples<'a, R: Rng + ?Sized>(
        &'a self,
        path: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<(&'a MapNode, Vector3<f64>)>> {
        let landmarks: Vec<&MapNode> = self
            .root
            .leaves(path)
            .into_iter()
            .filter(|node| matches!(node.kind(), NodeKind::Landmark(_)))
            .collect();

        if landmarks.is_empty() {
            return Err(Error::EmptyScope(path.to_string()));
        }

        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            let node = landmarks[rng.random_range(0..landmarks.len())];
            if let NodeKind::Landmark(gaussian) = node.kind() {
                samples.push((node, gaussian.draw(rng)));
            }
        }
        Ok(samples)
    }

    /// Flatten the tree into a [`MapSnapshot`] for external consumers.
    ///
    /// Walks all leaves with no path restriction and projects them into flat
    /// records together with the map-level metadata. Recomputed on every
    /// call.
    pub fn snapshot(&self) -> MapSnapshot {
        let mut landmarks = Vec::new();
        let mut lines = Vec::new();

        for leaf in self.root.leaves("") {
            match leaf.kind() {
                NodeKind::Landmark(gaussian) => landmarks.push(LandmarkRecord {
                    caption: leaf.caption().to_string(),
                    mean: gaussian.mean(),
                    covariance: gaussian.covariance(),
                }),
                NodeKind::Line(line) => lines.push(LineRecord {
                    caption: leaf.caption().to_string(),
                    from: line.from,
                    to: line.to,
                    height: line.height,
                }),
                NodeKind::Group(_) => {}
            }
        }

        MapSnapshot {
            limitations: self.limitations,
            translation: self.translation,
            landmarks,
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::Gaussian3;
    use crate::line::LineFeature;
    use nalgebra::Matrix3;
    use rand::{rngs::StdRng, SeedableRng};

    fn test_map() -> LandmarkMap {
        let mut basin = MapNode::group("basin");
        basin
            .add_child(MapNode::landmark(
                "buoy",
                Gaussian3::new(Vector3::new(1.0, 2.0, 3.0), Matrix3::identity()).unwrap(),
            ))
            .unwrap();
        basin
            .add_child(MapNode::line(
                "pipeline",
                LineFeature::new(Vector3::zeros(), Vector3::new(10.0, 0.0, 0.0), 0.5),
            ))
            .unwrap();

        let mut root = MapNode::group("root");
        root.add_child(basin).unwrap();

        LandmarkMap::new(
            Vector3::new(100.0, 50.0, 20.0),
            Vector3::new(-1.0, 0.0, 0.0),
            root,
        )
    }

    #[test]
    fn test_nearest_delegates_to_root() {
        let map = test_map();
        let (node, _) = map.nearest("basin", &Vector3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(node.caption(), "buoy");
    }

    #[test]
    fn test_draw_samples_skips_line_features() {
        let map = test_map();
        let mut rng = StdRng::seed_from_u64(3);
        let samples = map.draw_samples("basin", 50, &mut rng).unwrap();
        assert_eq!(samples.len(), 50);
        assert!(samples.iter().all(|(node, _)| node.caption() == "buoy"));
    }

    #[test]
    fn test_draw_samples_empty_scope_fails() {
        let map = test_map();
        let mut rng = StdRng::seed_from_u64(3);
        let result = map.draw_samples("harbor", 10, &mut rng);
        assert!(matches!(result, Err(Error::EmptyScope(path)) if path == "harbor"));
    }

    #[test]
    fn test_snapshot_projects_all_leaves() {
        let map = test_map();
        let snapshot = map.snapshot();
        assert_eq!(snapshot.limitations, Vector3::new(100.0, 50.0, 20.0));
        assert_eq!(snapshot.translation, Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(snapshot.landmarks.len(), 1);
        assert_eq!(snapshot.landmarks[0].caption, "buoy");
        assert_eq!(snapshot.landmarks[0].mean, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.lines[0].caption, "pipeline");
    }

    #[test]
    fn test_snapshot_of_empty_tree() {
        let map = LandmarkMap::new(Vector3::zeros(), Vector3::zeros(), MapNode::group("root"));
        let snapshot = map.snapshot();
        assert!(snapshot.landmarks.is_empty());
        assert!(snapshot.lines.is_empty());
    }
}
