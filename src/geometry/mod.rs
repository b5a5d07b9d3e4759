pub mod polyline;

pub use polyline::{Polyline, Segment, SegmentRemap, Segments};
