use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeomError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Ring error: {0}")]
    Ring(#[from] RingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ProjError {
    #[error("Invalid UTM zone: {0} (expected 1-60)")]
    InvalidZone(i64),

    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Structural problems with ring input where a vertex is required.
#[derive(Error, Debug, PartialEq)]
pub enum RingError {
    #[error("Ring is empty")]
    Empty,

    #[error("Ring has {count} points, at least {minimum} required")]
    TooFewVertices { count: usize, minimum: usize },

    #[error("Vertex index {index} out of range for ring with {count} vertices")]
    IndexOutOfRange { index: usize, count: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
