use crate::data::Color;
use crate::math::Vec3;
use crate::scene::Transform;
use super::BranchNode;

/// Radius floor; keeps thin tips from collapsing into invisible geometry
pub const MIN_RADIUS: f32 = 0.1;
/// Shortest segment the builder will emit
pub const MIN_LENGTH: f32 = 0.01;
/// End/start radius ratio along an ordinary segment
pub const STEM_TAPER: f32 = 0.8;
/// End/start radius ratio for terminal segments, which narrow sharply
pub const TIP_TAPER: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// First segment of the canopy pass
    Trunk,
    /// Continues the parent's growth axis
    Stem,
    /// Diverges from the parent's axis
    Branch,
    /// Diverging segment of the root pass
    Root,
    Leaf,
}

/// Immutable description of one tapered cylinder. The end sits straight up
/// the local Y axis; any divergence comes from the owning group's rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub anchor: Vec3,
    pub end_offset: Vec3,
    pub start_radius: f32,
    pub end_radius: f32,
    pub length: f32,
    pub color: Color,
    pub kind: SegmentKind,
    /// Cylinder meshes are centered, so the mesh sits half a length up to put
    /// its base on the group origin
    pub mesh_offset: Vec3,
}

/// Output of `build_segment`
#[derive(Debug, Clone)]
pub struct BuiltSegment {
    /// Group placed at the anchor, holding the segment
    pub group: BranchNode,
    /// End of the segment in the group's own frame
    pub end_position: Vec3,
    pub end_radius: f32,
}

/// Resolved end radius for a segment starting at `start_radius`
pub fn taper(start_radius: f32, is_terminal: bool) -> f32 {
    let ratio = if is_terminal { TIP_TAPER } else { STEM_TAPER };
    (start_radius * ratio).max(MIN_RADIUS)
}

/// Build one segment group anchored at `anchor` in the parent's frame.
/// Zero or negative sizes fall back to the smallest visible segment.
pub fn build_segment(
    anchor: Vec3,
    start_radius: f32,
    length: f32,
    color: Color,
    kind: SegmentKind,
    is_terminal: bool,
) -> BuiltSegment {
    let length = length.max(MIN_LENGTH);
    let start_radius = start_radius.max(MIN_RADIUS);
    let end_radius = taper(start_radius, is_terminal);
    let end_position = Vec3::along_y(length);

    let segment = Segment {
        anchor,
        end_offset: end_position,
        start_radius,
        end_radius,
        length,
        color,
        kind,
        mesh_offset: Vec3::along_y(length / 2.0),
    };

    BuiltSegment {
        group: BranchNode::new(segment, Transform::at(anchor)),
        end_position,
        end_radius,
    }
}
