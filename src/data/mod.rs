pub mod color;
pub mod params;

pub use color::Color;
pub use params::{GrowthParameters, ParameterLimits, RootScaling};
