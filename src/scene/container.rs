use crate::growth::{BranchNode, Leaf};
use crate::math::Mat4;
use crate::mesh::Mesh;
use super::Transform;

/// Anything a generated segment group can be attached under: the top-level
/// containers and every branch group.
pub trait SceneGroup {
    fn attach(&mut self, child: BranchNode);

    /// Set the terminal leaf. A group carries at most one; a second call replaces it.
    fn attach_leaf(&mut self, leaf: Leaf);

    fn children(&self) -> &[BranchNode];
}

/// Child indices from a container down to one node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Tally of what a `clear` tore down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Released {
    pub nodes: usize,
    pub leaves: usize,
    pub vertices: usize,
}

/// Top-level group the host owns (tree or roots). Generation is the only
/// writer during a pass; the host decides how long the container lives.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub name: String,
    pub transform: Transform,
    children: Vec<BranchNode>,
    leaf: Option<Leaf>,
    geometry: Option<Mesh>,
}

impl Container {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.leaf.is_none()
    }

    pub fn leaf(&self) -> Option<&Leaf> {
        self.leaf.as_ref()
    }

    /// Remove every node and release the materialized geometry
    pub fn clear(&mut self) -> Released {
        let nodes: usize = self.children.iter().map(BranchNode::count).sum();
        let leaves = self.children.iter().map(BranchNode::leaf_count).sum::<usize>()
            + usize::from(self.leaf.is_some());
        let vertices = self.geometry.as_ref().map_or(0, Mesh::vertex_count);

        self.children.clear();
        self.leaf = None;
        self.geometry = None;

        let released = Released { nodes, leaves, vertices };
        log::debug!("cleared container '{}': {:?}", self.name, released);
        released
    }

    pub fn geometry(&self) -> Option<&Mesh> {
        self.geometry.as_ref()
    }

    /// Replace the materialized geometry, releasing the previous mesh
    pub fn set_geometry(&mut self, mesh: Mesh) {
        self.geometry = Some(mesh);
    }

    /// Number of segment groups in the whole container
    pub fn segment_count(&self) -> usize {
        self.children.iter().map(BranchNode::count).sum()
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(BranchNode::leaf_count).sum::<usize>()
            + usize::from(self.leaf.is_some())
    }

    pub fn node(&self, path: &NodePath) -> Option<&BranchNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.children.get(*first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut BranchNode> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.children.get_mut(*first)?;
        for &index in rest {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }

    /// World matrix of the node at `path`, including the container's own transform
    pub fn world_matrix(&self, path: &NodePath) -> Option<Mat4> {
        let (first, rest) = path.0.split_first()?;
        let mut node = self.children.get(*first)?;
        let mut world = self.transform.matrix().mul(&node.transform.matrix());
        for &index in rest {
            node = node.children.get(index)?;
            world = world.mul(&node.transform.matrix());
        }
        Some(world)
    }

    /// Every node with its path, parents before children
    pub fn iter_with_paths(&self) -> impl Iterator<Item = (NodePath, &BranchNode)> {
        let mut stack: Vec<(NodePath, &BranchNode)> = self
            .children
            .iter()
            .enumerate()
            .rev()
            .map(|(i, child)| (NodePath::root().child(i), child))
            .collect();

        std::iter::from_fn(move || {
            let (path, node) = stack.pop()?;
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((path.child(i), child));
            }
            Some((path, node))
        })
    }

    pub fn for_each_node_mut(&mut self, f: &mut impl FnMut(&mut BranchNode)) {
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }
}

impl SceneGroup for Container {
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
