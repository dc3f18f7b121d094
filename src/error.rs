//! Error types for VarunaMap.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// VarunaMap error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error reading a map document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    Parse(String),

    /// Required top-level document key is absent
    #[error("Missing document key: {0}")]
    MissingKey(&'static str),

    /// A node in the document is neither a landmark, a mapping, nor a sequence
    #[error("Malformed map node: {0}")]
    Structure(String),

    /// Child index out of range
    #[error("Child index {index} out of bounds (group has {len} children)")]
    IndexOutOfBounds {
        /// Requested child index
        index: usize,
        /// Number of children in the group
        len: usize,
    },

    /// Covariance matrix cannot be inverted or factorized
    #[error("Covariance matrix is not symmetric positive definite")]
    SingularCovariance,

    /// Sampling was requested over a path that matches no landmarks
    #[error("No landmarks under path {0:?}")]
    EmptyScope(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
