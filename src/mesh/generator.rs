use crate::growth::{BranchNode, Leaf, Segment, SegmentKind};
use crate::math::{Mat4, Vec3};
use crate::scene::{Container, NodePath, SceneGroup};
use super::branch::{Mesh, Vertex, create_ring, connect_rings, fan_to_point};

/// Parameters for mesh generation
#[derive(Debug, Clone, Copy)]
pub struct MeshParams {
    /// Radial segments around each segment (more = smoother)
    pub radial_segments: usize,
    /// Radial segments around each leaf cone
    pub leaf_segments: usize,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            radial_segments: 16,
            leaf_segments: 8,
        }
    }
}

/// Per-segment mesh data for picking
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMeshInfo {
    pub path: NodePath,
    pub kind: SegmentKind,
    pub length: f32,
    pub start_radius: f32,
    pub end_radius: f32,
    /// Node frame in world space; the segment runs up its local Y from the origin
    pub world: Mat4,
    pub vertex_start: u32,
    pub vertex_count: u32,
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

/// Turns a container's node description into one world-space mesh
pub struct TreeMesher {
    params: MeshParams,
}

impl TreeMesher {
    pub fn new(params: MeshParams) -> Self {
        Self { params }
    }

    /// Build the mesh and hand it to the container, releasing the old one
    pub fn materialize(&self, container: &mut Container) -> Vec<SegmentMeshInfo> {
        let (mesh, infos) = self.build(container);
        log::debug!(
            "materialized '{}': {} vertices, {} triangles",
            container.name,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        container.set_geometry(mesh);
        infos
    }

    pub fn build(&self, container: &Container) -> (Mesh, Vec<SegmentMeshInfo>) {
        let mut mesh = Mesh::new();
        let mut infos = Vec::new();
        let root = container.transform.matrix();

        for (i, child) in container.children().iter().enumerate() {
            self.build_node(child, NodePath::root().child(i), &root, &mut mesh, &mut infos);
        }
        if let Some(leaf) = container.leaf() {
            self.append_leaf(&mut mesh, &root.mul(&leaf.transform.matrix()), leaf);
        }

        (mesh, infos)
    }

    fn build_node(
        &self,
        node: &BranchNode,
        path: NodePath,
        parent_world: &Mat4,
        mesh: &mut Mesh,
        infos: &mut Vec<SegmentMeshInfo>,
    ) {
        let world = parent_world.mul(&node.transform.matrix());
        let segment = &node.segment;

        let vertex_start = mesh.vertices.len() as u32;
        self.append_segment(mesh, &world, segment);

        infos.push(SegmentMeshInfo {
            path: path.clone(),
            kind: segment.kind,
            length: segment.length,
            start_radius: segment.start_radius,
            end_radius: segment.end_radius,
            world,
            vertex_start,
            vertex_count: mesh.vertices.len() as u32 - vertex_start,
            bounds_center: world.transform_point(segment.mesh_offset),
            bounds_radius: segment.length / 2.0 + segment.start_radius,
        });

        if let Some(leaf) = &node.leaf {
            self.append_leaf(mesh, &world.mul(&leaf.transform.matrix()), leaf);
        }

        for (i, child) in node.children.iter().enumerate() {
            self.build_node(child, path.child(i), &world, mesh, infos);
        }
    }

    /// Tapered cylinder from the group origin to the segment end, capped both ends
    fn append_segment(&self, mesh: &mut Mesh, world: &Mat4, segment: &Segment) {
        let n = self.params.radial_segments;
        let color = segment.color.to_array();
        let half = segment.length / 2.0;
        let bottom_y = segment.mesh_offset.y - half;
        let top_y = segment.mesh_offset.y + half;

        let bottom = create_ring(bottom_y, segment.start_radius, n, 0.0, color);
        let top = create_ring(top_y, segment.end_radius, n, 1.0, color);

        let bottom_start = mesh.add_vertices(bottom.into_iter().map(|v| v.transformed(world)));
        let top_start = mesh.add_vertices(top.into_iter().map(|v| v.transformed(world)));
        connect_rings(mesh, bottom_start, top_start, n);

        let base_center = Vertex::new(Vec3::along_y(bottom_y), -Vec3::UP)
            .with_uv(0.5, 0.0)
            .with_color(color)
            .transformed(world);
        let top_center = Vertex::new(Vec3::along_y(top_y), Vec3::UP)
            .with_uv(0.5, 1.0)
            .with_color(color)
            .transformed(world);
        fan_to_point(mesh, bottom_start, n, base_center);
        fan_to_point(mesh, top_start, n, top_center);
    }

    /// Cone centered on the leaf origin, apex up its local Y
    fn append_leaf(&self, mesh: &mut Mesh, world: &Mat4, leaf: &Leaf) {
        let n = self.params.leaf_segments;
        let color = leaf.color.to_array();
        let half = leaf.height / 2.0;

        let base = create_ring(-half, leaf.radius, n, 0.0, color);
        let base_start = mesh.add_vertices(base.into_iter().map(|v| v.transformed(world)));
        let apex = Vertex::new(Vec3::along_y(half), Vec3::UP)
            .with_uv(0.5, 1.0)
            .with_color(color)
            .transformed(world);
        fan_to_point(mesh, base_start, n, apex);
    }
}
