//! Construction-time validation errors.

use thiserror::Error;

/// Errors raised while building geometry, lights or a camera frame.
///
/// These are fatal for the object being built. Degenerate cases met while
/// intersecting (parallel rays, tangents) are not errors; they produce no hit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{0} must not be the zero vector")]
    ZeroVector(&'static str),

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("points must be distinct")]
    DuplicatePoints,

    #[error("points must not be collinear")]
    CollinearPoints,

    #[error("all polygon vertices must lie in one plane")]
    NonCoplanarVertices,

    #[error("polygon vertices must be ordered and convex")]
    NonConvex,

    #[error("camera up and forward vectors must be orthogonal")]
    NonOrthogonal,
}

/// Result type for geometry construction.
pub type GeometryResult<T> = Result<T, GeometryError>;
