//! Recursive branch generation.
//!
//! `segment` builds single tapered segments, `generator` recurses over depth
//! levels, and `TreeGrowth` drives a full clear-and-regenerate pass over the
//! tree and root containers.

pub mod generator;
pub mod node;
pub mod segment;
pub mod tree;

pub use generator::{BranchGenerator, GrowthAxis, GrowthState};
pub use node::{BranchNode, Leaf};
pub use segment::{build_segment, BuiltSegment, Segment, SegmentKind, MIN_RADIUS};
pub use tree::{GrowthReport, TreeGrowth};
