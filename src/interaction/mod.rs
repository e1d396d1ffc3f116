pub mod graft;
pub mod picking;

pub use graft::graft_branch;
pub use picking::{PickEvent, Ray, RayPicker};
