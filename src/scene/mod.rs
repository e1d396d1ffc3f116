//! Scene-graph side of generation: node transforms, the group trait every
//! parent implements, and the externally owned top-level containers.

pub mod container;
pub mod transform;

pub use container::{Container, NodePath, Released, SceneGroup};
pub use transform::{Euler, Transform};
