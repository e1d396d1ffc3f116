use crate::data::Color;
use crate::math::Vec3;
use crate::scene::{Euler, SceneGroup, Transform};
use super::Segment;

/// Leaf cone radius per level of depth
pub const LEAF_RADIUS_PER_LEVEL: f32 = 1.5;
/// Leaf cone height per level of depth
pub const LEAF_HEIGHT_PER_LEVEL: f32 = 4.0;

/// Terminal leaf cone, turned half over so its apex points away from the tip
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub transform: Transform,
    pub radius: f32,
    pub height: f32,
    pub color: Color,
    pub depth: u32,
}

impl Leaf {
    /// Leaves grow with depth so the canopy reads larger than the inner crown
    pub fn at_depth(anchor: Vec3, depth: u32, color: Color) -> Self {
        let scale = depth.max(1) as f32;
        Self {
            transform: Transform::at(anchor).with_rotation(Euler::flipped()),
            radius: LEAF_RADIUS_PER_LEVEL * scale,
            height: LEAF_HEIGHT_PER_LEVEL * scale,
            color,
            depth,
        }
    }
}

/// A segment group: the segment, where it sits in its parent's frame, and
/// the stems and branches of the next level. Parent-owned all the way down.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchNode {
    pub segment: Segment,
    pub transform: Transform,
    /// Recursion level the node was created at
    pub depth: u32,
    pub children: Vec<BranchNode>,
    pub leaf: Option<Leaf>,
}

impl BranchNode {
    pub fn new(segment: Segment, transform: Transform) -> Self {
        Self {
            segment,
            transform,
            depth: 0,
            children: Vec::new(),
            leaf: None,
        }
    }

    pub fn at_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// Get all nodes in pre-order (self first, then children)
    pub fn iter_preorder(&self) -> impl Iterator<Item = &BranchNode> {
        PreorderNodeIter { stack: vec![self] }
    }

    /// Total number of nodes in subtree
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(|c| c.count()).sum::<usize>()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter_preorder().filter(|n| n.leaf.is_some()).count()
    }

    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut BranchNode)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}

impl SceneGroup for BranchNode {
    fn attach(&mut self, child: BranchNode) {
        self.children.push(child);
    }

    fn attach_leaf(&mut self, leaf: Leaf) {
        self.leaf = Some(leaf);
    }

    fn children(&self) -> &[BranchNode] {
        &self.children
    }
}

struct PreorderNodeIter<'a> {
    stack: Vec<&'a BranchNode>,
}

impl<'a> Iterator for PreorderNodeIter<'a> {
    type Item = &'a BranchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}
