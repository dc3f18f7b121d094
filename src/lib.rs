//! # Varuna-Map: Hierarchical Landmark Maps for Underwater Localization
//!
//! A landmark map library for underwater robot localization. The map is a
//! tree of named groups whose leaves are point landmarks (3D Gaussian
//! position beliefs) or line features. It answers two queries:
//!
//! - **Nearest landmark by likelihood**: associate a sensor detection with
//!   a known landmark via Mahalanobis distance, optionally scoped to a
//!   subtree by a dotted caption path like `"basin.north"`.
//! - **Position sampling**: draw landmark positions from their probability
//!   distributions, for Monte-Carlo localization tests and particle
//!   initialization.
//!
//! Maps are authored as YAML documents and immutable once loaded. External
//! consumers (e.g. a rendering layer) receive a flattened [`MapSnapshot`]
//! instead of walking the tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use varuna_map::LandmarkMap;
//! use nalgebra::Vector3;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let doc = "
//! metrics: [100.0, 50.0, 20.0]
//! reference: [0.0, 0.0, 0.0]
//! root:
//!   basin:
//!     mean: [1.0, 2.0, 3.0]
//!     cov: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
//!     caption: buoy
//! ";
//! let map = LandmarkMap::from_yaml_str(doc).unwrap();
//!
//! // Associate an observation with the closest landmark.
//! let observation = Vector3::new(1.2, 1.9, 3.1);
//! let (node, distance) = map.nearest("basin", &observation).unwrap();
//! assert_eq!(node.caption(), "buoy");
//! assert!(distance < 1.0);
//!
//! // Draw position hypotheses from the landmark distributions.
//! let mut rng = StdRng::seed_from_u64(1);
//! let samples = map.draw_samples("basin", 100, &mut rng).unwrap();
//! assert_eq!(samples.len(), 100);
//! ```
//!
//! ## Architecture
//!
//! - [`gaussian`]: Gaussian position belief (Mahalanobis distance, sampling)
//! - [`line`]: line feature geometry
//! - [`node`]: the polymorphic landmark tree and path-scoped queries
//! - [`map`]: [`LandmarkMap`] with YAML loading and the sampling entry point
//! - [`snapshot`]: flattened projection for presentation layers
//! - [`error`]: crate-wide error type
//!
//! ## Concurrency
//!
//! Everything is single-threaded and synchronous. A loaded map is never
//! mutated by queries, so it can be shared read-only between threads; no
//! internal synchronization is provided.

pub mod error;
pub mod gaussian;
pub mod line;
pub mod map;
pub mod node;
pub mod snapshot;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use gaussian::Gaussian3;
pub use line::LineFeature;
pub use map::LandmarkMap;
pub use node::{MapNode, NodeKind};
pub use snapshot::{LandmarkRecord, LineRecord, MapSnapshot};
