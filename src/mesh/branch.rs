use crate::math::{Mat4, Vec3};

/// A vertex with position, normal, UV and color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            normal,
            uv: [0.0, 0.0],
            color: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Move from a node's local frame into world space
    pub fn transformed(mut self, world: &Mat4) -> Self {
        self.position = world.transform_point(self.position);
        self.normal = world.transform_direction(self.normal).normalize();
        self
    }

    /// Flat layout for a vertex buffer:
    /// position(3) + normal(3) + uv(2) + color(3) = 11 floats
    pub fn to_array(&self) -> [f32; 11] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
            self.uv[0], self.uv[1],
            self.color[0], self.color[1], self.color[2],
        ]
    }
}

/// A mesh composed of vertices and triangle indices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add vertices and return the starting index
    pub fn add_vertices(&mut self, verts: impl IntoIterator<Item = Vertex>) -> u32 {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Add a quad as two triangles (CCW winding)
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Ring of vertices around local +Y at height `y`, outward normals
pub fn create_ring(y: f32, radius: f32, segments: usize, v_coord: f32, color: [f32; 3]) -> Vec<Vertex> {
    (0..segments)
        .map(|i| {
            let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
            let outward = Vec3::new(angle.cos(), 0.0, angle.sin());
            let position = Vec3::along_y(y) + outward.scale(radius);

            Vertex::new(position, outward)
                .with_uv(i as f32 / segments as f32, v_coord)
                .with_color(color)
        })
        .collect()
}

/// Connect two rings with triangles
pub fn connect_rings(mesh: &mut Mesh, ring1_start: u32, ring2_start: u32, segments: usize) {
    for i in 0..segments {
        let i_next = (i + 1) % segments;

        let a = ring1_start + i as u32;
        let b = ring1_start + i_next as u32;
        let c = ring2_start + i_next as u32;
        let d = ring2_start + i as u32;

        mesh.add_quad(a, d, c, b);
    }
}

/// Close a ring with a fan around `tip`
pub fn fan_to_point(mesh: &mut Mesh, ring_start: u32, segments: usize, tip: Vertex) {
    let tip_idx = mesh.add_vertices(std::iter::once(tip));
    for i in 0..segments {
        let next = (i + 1) % segments;
        mesh.add_triangle(ring_start + i as u32, ring_start + next as u32, tip_idx);
    }
}
