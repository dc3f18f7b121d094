//! YAML document loading and saving for [`LandmarkMap`].
//!
//! A map document has three top-level keys:
//!
//! - `metrics`: 3-element bounding-extent vector
//! - `reference`: 3-element translation vector
//! - `root`: the landmark tree
//!
//! Within `root`, a mapping with a `mean` key (3 numbers) and a `cov` key
//! (9 numbers, row-major 3×3) is a **point landmark**, with an optional
//! `caption` string (default empty). A mapping with a `from` key is a
//! **line feature** (`from`/`to` endpoints, optional `height`). Any other
//! mapping entry's key is a **group name** whose value is parsed as a
//! subtree. A sequence flattens its elements into the same parent group.
//!
//! # Example
//!
//! ```yaml
//! metrics: [100.0, 50.0, 20.0]
//! reference: [0.0, 0.0, 0.0]
//! root:
//!   basin:
//!     - mean: [1.0, 2.0, 3.0]
//!       cov: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
//!       caption: buoy
//!     - from: [0.0, 5.0, 0.0]
//!       to: [10.0, 5.0, 0.0]
//!       height: 2.0
//!       caption: wall
//! ```

use std::io::Read;
use std::path::Path;

use log::debug;
use nalgebra::{Matrix3, Vector3};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::gaussian::Gaussian3;
use crate::line::LineFeature;
use crate::node::{MapNode, NodeKind};

use super::LandmarkMap;

impl LandmarkMap {
    /// Load a map from a YAML file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`]
    /// on invalid YAML, [`Error::MissingKey`] when a top-level key is
    /// absent, and [`Error::Structure`] / [`Error::SingularCovariance`] on
    /// malformed tree content. No partially built map is ever returned.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Load a map from any readable stream.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_yaml_str(&contents)
    }

    /// Load a map from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(yaml)?;

        let limitations = parse_vector3(require(&doc, "metrics")?)?;
        let translation = parse_vector3(require(&doc, "reference")?)?;

        let mut root = MapNode::group("root");
        parse_node(require(&doc, "root")?, &mut root)?;

        Ok(Self::new(limitations, translation, root))
    }

    /// Serialize the map back to the YAML document format.
    ///
    /// Emits the same document shape [`from_yaml_str`](Self::from_yaml_str)
    /// accepts: group children are written as a sequence whose group
    /// elements are single-entry mappings keyed by caption.
    pub fn to_yaml_string(&self) -> Result<String> {
        let mut doc = Mapping::new();
        doc.insert("metrics".into(), vector3_to_value(&self.limitations));
        doc.insert("reference".into(), vector3_to_value(&self.translation));
        doc.insert("root".into(), children_to_value(self.root.children()));
        Ok(serde_yaml::to_string(&Value::Mapping(doc))?)
    }

    /// Save the map to a YAML file.
    pub fn to_yaml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml_string()?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

fn require<'a>(doc: &'a Value, key: &'static str) -> Result<&'a Value> {
    doc.get(key).ok_or(Error::MissingKey(key))
}

/// Recursively parse a document node into children of `parent`.
fn parse_node(value: &Value, parent: &mut MapNode) -> Result<()> {
    match value {
        Value::Mapping(_) if value.get("mean").is_some() => {
            let mean = parse_vector3(
                value
                    .get("mean")
                    .ok_or_else(|| Error::Structure("landmark without mean".into()))?,
            )?;
            let cov = parse_matrix3(
                value
                    .get("cov")
                    .ok_or_else(|| Error::Structure("landmark without cov".into()))?,
            )?;
            let caption = optional_caption(value);
            debug!(
                "adding landmark {:?} to group {:?}",
                caption,
                parent.caption()
            );
            parent.add_child(MapNode::landmark(caption, Gaussian3::new(mean, cov)?))?;
        }
        Value::Mapping(_) if value.get("from").is_some() => {
            let from = parse_vector3(
                value
                    .get("from")
                    .ok_or_else(|| Error::Structure("line without from".into()))?,
            )?;
            let to = parse_vector3(
                value
                    .get("to")
                    .ok_or_else(|| Error::Structure("line without to".into()))?,
            )?;
            let height = value.get("height").and_then(Value::as_f64).unwrap_or(0.0);
            let caption = optional_caption(value);
            debug!("adding line {:?} to group {:?}", caption, parent.caption());
            parent.add_child(MapNode::line(caption, LineFeature::new(from, to, height)))?;
        }
        Value::Mapping(mapping) => {
            for (key, child_value) in mapping {
                let name = key.as_str().ok_or_else(|| {
                    Error::Structure(format!("group name is not a string: {:?}", key))
                })?;
                debug!("group found: {}", name);
                let mut group = MapNode::group(name);
                parse_node(child_value, &mut group)?;
                parent.add_child(group)?;
            }
        }
        Value::Sequence(items) => {
            for item in items {
                parse_node(item, parent)?;
            }
        }
        other => {
            return Err(Error::Structure(format!(
                "expected a landmark, mapping or sequence, got {:?}",
                other
            )));
        }
    }
    Ok(())
}

fn optional_caption(value: &Value) -> String {
    value
        .get("caption")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn parse_vector3(value: &Value) -> Result<Vector3<f64>> {
    let numbers = parse_numbers(value, 3)?;
    Ok(Vector3::new(numbers[0], numbers[1], numbers[2]))
}

fn parse_matrix3(value: &Value) -> Result<Matrix3<f64>> {
    let numbers = parse_numbers(value, 9)?;
    Ok(Matrix3::from_row_slice(&numbers))
}

fn parse_numbers(value: &Value, expected: usize) -> Result<Vec<f64>> {
    let seq = value.as_sequence().ok_or_else(|| {
        Error::Structure(format!("expected a {}-element number sequence", expected))
    })?;
    if seq.len() != expected {
        return Err(Error::Structure(format!(
            "expected {} numbers, got {}",
            expected,
            seq.len()
        )));
    }
    seq.iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| Error::Structure(format!("not a number: {:?}", item)))
        })
        .collect()
}

fn vector3_to_value(v: &Vector3<f64>) -> Value {
    Value::Sequence(vec![v.x.into(), v.y.into(), v.z.into()])
}

fn matrix3_to_value(m: &Matrix3<f64>) -> Value {
    let mut numbers = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            numbers.push(m[(row, col)].into());
        }
    }
    Value::Sequence(numbers)
}

/// Serialize a group's children as a sequence: leaves as leaf mappings,
/// subgroups as single-entry mappings keyed by caption.
fn children_to_value(children: &[MapNode]) -> Value {
    Value::Sequence(children.iter().map(node_to_value).collect())
}

fn node_to_value(node: &MapNode) -> Value {
    match node.kind() {
        NodeKind::Group(_) => {
            let mut entry = Mapping::new();
            entry.insert(node.caption().into(), children_to_value(node.children()));
            Value::Mapping(entry)
        }
        NodeKind::Landmark(gaussian) => {
            let mut leaf = Mapping::new();
            leaf.insert("mean".into(), vector3_to_value(&gaussian.mean()));
            leaf.insert("cov".into(), matrix3_to_value(&gaussian.covariance()));
            if !node.caption().is_empty() {
                leaf.insert("caption".into(), node.caption().into());
            }
            Value::Mapping(leaf)
        }
        NodeKind::Line(line) => {
            let mut leaf = Mapping::new();
            leaf.insert("from".into(), vector3_to_value(&line.from));
            leaf.insert("to".into(), vector3_to_value(&line.to));
            leaf.insert("height".into(), line.height.into());
            if !node.caption().is_empty() {
                leaf.insert("caption".into(), node.caption().into());
            }
            Value::Mapping(leaf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIN_DOC: &str = "
metrics: [100.0, 50.0, 20.0]
reference: [2.0, 0.0, -1.0]
root:
  basin:
    - mean: [1.0, 2.0, 3.0]
      cov: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
      caption: buoy
    - from: [0.0, 5.0, 0.0]
      to: [10.0, 5.0, 0.0]
      height: 2.0
      caption: wall
  north:
    pole:
      mean: [10.0, 0.0, 0.0]
      cov: [2.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 2.0]
";

    #[test]
    fn test_parse_metadata() {
        let map = LandmarkMap::from_yaml_str(BASIN_DOC).unwrap();
        assert_eq!(map.limitations(), Vector3::new(100.0, 50.0, 20.0));
        assert_eq!(map.translation(), Vector3::new(2.0, 0.0, -1.0));
    }

    #[test]
    fn test_parse_tree_structure() {
        let map = LandmarkMap::from_yaml_str(BASIN_DOC).unwrap();
        let captions: Vec<&str> = map.leaves("").iter().map(|n| n.caption()).collect();
        // The landmark under `north.pole` gets no caption key, so it stays
        // unnamed; its enclosing group carries the name.
        assert_eq!(captions, vec!["buoy", "wall", ""]);
        assert_eq!(map.leaves("basin").len(), 2);
        assert_eq!(map.leaves("north.pole").len(), 1);
    }

    #[test]
    fn test_sequence_flattens_into_parent() {
        let map = LandmarkMap::from_yaml_str(BASIN_DOC).unwrap();
        let basin = map.root().child(0).unwrap();
        assert_eq!(basin.caption(), "basin");
        assert_eq!(basin.child_count(), 2);
    }

    #[test]
    fn test_missing_metadata_key_fails() {
        let doc = "
metrics: [1.0, 1.0, 1.0]
root: []
";
        let result = LandmarkMap::from_yaml_str(doc);
        assert!(matches!(result, Err(Error::MissingKey("reference"))));
    }

    #[test]
    fn test_scalar_node_is_structural_error() {
        let doc = "
metrics: [1.0, 1.0, 1.0]
reference: [0.0, 0.0, 0.0]
root:
  basin: 42
";
        let result = LandmarkMap::from_yaml_str(doc);
        assert!(matches!(result, Err(Error::Structure(_))));
    }

    #[test]
    fn test_malformed_covariance_fails() {
        let doc = "
metrics: [1.0, 1.0, 1.0]
reference: [0.0, 0.0, 0.0]
root:
  buoy:
    mean: [0.0, 0.0, 0.0]
    cov: [1.0, 0.0, 0.0]
";
        let result = LandmarkMap::from_yaml_str(doc);
        assert!(matches!(result, Err(Error::Structure(_))));
    }

    #[test]
    fn test_singular_covariance_fails_load() {
        let doc = "
metrics: [1.0, 1.0, 1.0]
reference: [0.0, 0.0, 0.0]
root:
  buoy:
    mean: [0.0, 0.0, 0.0]
    cov: [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
";
        let result = LandmarkMap::from_yaml_str(doc);
        assert!(matches!(result, Err(Error::SingularCovariance)));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = LandmarkMap::from_yaml_str("metrics: [1.0, 2.0");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_reader_unreadable_stream() {
        struct FailingReader;
        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
            }
        }
        let result = LandmarkMap::from_reader(FailingReader);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_yaml_round_trip() {
        let original = LandmarkMap::from_yaml_str(BASIN_DOC).unwrap();
        let yaml = original.to_yaml_string().unwrap();
        let reloaded = LandmarkMap::from_yaml_str(&yaml).unwrap();
        assert_eq!(original.snapshot(), reloaded.snapshot());
        assert_eq!(
            reloaded
                .leaves("basin")
                .iter()
                .map(|n| n.caption())
                .collect::<Vec<_>>(),
            vec!["buoy", "wall"]
        );
    }
}
