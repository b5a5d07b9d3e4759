use thiserror::Error;

use crate::topology::CrossingId;

/// Top-level error type for the knot diagram engine.
#[derive(Debug, Error)]
pub enum KnodiaError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors related to the structure of a diagram and its crossings.
#[derive(Debug, Error, PartialEq)]
pub enum DiagramError {
    #[error("invalid diagram: {0}")]
    InvalidDiagram(String),

    #[error("unknown crossing: {0:?}")]
    UnknownCrossing(CrossingId),

    #[error("vertex index {index} is out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no crossing between segments {first} and {second}")]
    NoCrossingOnSegments { first: usize, second: usize },
}

/// How two non-adjacent segments meet without crossing transversally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegeneracyKind {
    /// The segments are collinear and share a stretch of positive length.
    CollinearOverlap,
    /// An endpoint of one segment lies on the other segment.
    VertexTouch,
}

/// Errors related to geometric computations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("degenerate geometry between segments {first} and {second}: {kind:?}")]
    Degenerate {
        first: usize,
        second: usize,
        kind: DegeneracyKind,
    },
}

/// Convenience type alias for results using [`KnodiaError`].
pub type Result<T> = std::result::Result<T, KnodiaError>;
