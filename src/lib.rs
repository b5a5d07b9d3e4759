//! Knot diagram geometry and crossing derivation.
//!
//! A [`Diagram`] is a closed polyline in the plane. Its self-intersections
//! are derived after every edit, carry a stable identity and an over/under
//! order, and can be exported as a traversal-ordered Gauss code.

pub mod config;
pub mod diagram;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod snapshot;
pub mod topology;

pub use config::{DegeneracyPolicy, DiagramConfig};
pub use diagram::Diagram;
pub use error::{DegeneracyKind, DiagramError, GeometryError, KnodiaError, Result};
pub use operations::export::{GaussCode, GaussToken, Passage};
pub use snapshot::DiagramSnapshot;
pub use topology::{Crossing, CrossingId, CrossingSign, Strand};
