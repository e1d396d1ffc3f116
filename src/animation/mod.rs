//! Cooperative per-tick animation of a generated tree

mod spin;

pub use spin::SpinAnimation;
