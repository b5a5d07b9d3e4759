mod pick;
mod regions;

pub use pick::{PickSegment, PickVertex};
pub use regions::{Faces, Regions};
