pub mod branch;
pub mod generator;

pub use branch::{Mesh, Vertex};
pub use generator::{MeshParams, SegmentMeshInfo, TreeMesher};
