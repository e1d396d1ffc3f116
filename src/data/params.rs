use serde::{Deserialize, Serialize};
use crate::error::{Result, TreeError};
use super::Color;

/// Parameters the host's editing panel owns and the generator reads before
/// every pass. Field names match the panel's camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthParameters {
    /// Length of the first segment
    pub branch_length: f32,
    /// Radius of the first segment
    pub branch_starting_thickness: f32,
    /// Per-step decay for stem continuations, in (0, 1)
    pub stem_to_stem_ratio: f32,
    /// Per-step decay for diverging branches, in (0, 1)
    pub stem_to_branch_ratio: f32,
    /// Tilt of a branch off its parent's axis, degrees
    pub angle: f32,
    /// Per-sibling rotation about the growth axis, or the symmetric random
    /// range when random rotation is enabled, degrees
    pub axis_rotation: f32,
    /// Number of branching levels
    pub depth: u32,
    /// Siblings produced per level
    pub branches: u32,
    pub enable_random_axis_rotation: bool,
    pub branch_color: Color,
    pub roots: bool,
    pub leafs: bool,
    pub animate: bool,
}

impl Default for GrowthParameters {
    fn default() -> Self {
        Self {
            branch_length: 50.0,
            branch_starting_thickness: 10.0,
            stem_to_stem_ratio: 0.8,
            stem_to_branch_ratio: 0.9,
            angle: 60.0,
            axis_rotation: 192.0,
            depth: 3,
            branches: 6,
            enable_random_axis_rotation: false,
            branch_color: Color::WHITE,
            roots: false,
            leafs: false,
            animate: false,
        }
    }
}

impl GrowthParameters {
    /// Parse a YAML preset; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let params: GrowthParameters = serde_yaml::from_str(yaml)?;
        log::info!(
            "loaded growth preset: depth={} branches={} angle={}",
            params.depth, params.branches, params.angle
        );
        Ok(params)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write one field by its panel name. Booleans treat any non-zero value as set.
    pub fn set_field(&mut self, name: &str, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(TreeError::InvalidValue { name: name.to_string(), value });
        }

        let as_count = || value.round().max(0.0) as u32;
        let as_flag = value != 0.0;

        match name {
            "branchLength" => self.branch_length = value as f32,
            "branchStartingThickness" => self.branch_starting_thickness = value as f32,
            "stemToStemRatio" => self.stem_to_stem_ratio = value as f32,
            "stemToBranchRatio" => self.stem_to_branch_ratio = value as f32,
            "angle" => self.angle = value as f32,
            "axisRotation" => self.axis_rotation = value as f32,
            "depth" => self.depth = as_count(),
            "branches" => self.branches = as_count(),
            "enableRandomAxisRotation" => self.enable_random_axis_rotation = as_flag,
            "branchColor" => self.branch_color = Color::from_hex(value as u32),
            "roots" => self.roots = as_flag,
            "leafs" => self.leafs = as_flag,
            "animate" => self.animate = as_flag,
            _ => return Err(TreeError::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    /// Read one field by its panel name, as the slider shows it.
    /// Booleans read as 0/1 and `branchColor` as its packed hex value.
    pub fn field(&self, name: &str) -> Result<f64> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let value = match name {
            "branchLength" => f64::from(self.branch_length),
            "branchStartingThickness" => f64::from(self.branch_starting_thickness),
            "stemToStemRatio" => f64::from(self.stem_to_stem_ratio),
            "stemToBranchRatio" => f64::from(self.stem_to_branch_ratio),
            "angle" => f64::from(self.angle),
            "axisRotation" => f64::from(self.axis_rotation),
            "depth" => f64::from(self.depth),
            "branches" => f64::from(self.branches),
            "enableRandomAxisRotation" => flag(self.enable_random_axis_rotation),
            "branchColor" => f64::from(self.branch_color.to_hex()),
            "roots" => flag(self.roots),
            "leafs" => flag(self.leafs),
            "animate" => flag(self.animate),
            _ => return Err(TreeError::UnknownParameter(name.to_string())),
        };
        Ok(value)
    }

    /// Pull every numeric field into the editor's slider range
    pub fn clamped(&self, limits: &ParameterLimits) -> Self {
        let mut out = self.clone();
        out.branch_length = clamp_logged("branchLength", self.branch_length, limits.branch_length);
        out.branch_starting_thickness = clamp_logged(
            "branchStartingThickness",
            self.branch_starting_thickness,
            limits.branch_starting_thickness,
        );
        out.stem_to_stem_ratio = clamp_logged("stemToStemRatio", self.stem_to_stem_ratio, limits.ratio);
        out.stem_to_branch_ratio =
            clamp_logged("stemToBranchRatio", self.stem_to_branch_ratio, limits.ratio);
        out.angle = clamp_logged("angle", self.angle, limits.angle);
        out.axis_rotation = clamp_logged("axisRotation", self.axis_rotation, limits.axis_rotation);

        let depth = self.depth.min(limits.max_depth);
        let branches = self.branches.min(limits.max_branches);
        if depth != self.depth || branches != self.branches {
            log::warn!(
                "depth/branches {}/{} clamped to {}/{}",
                self.depth, self.branches, depth, branches
            );
        }
        out.depth = depth;
        out.branches = branches;
        out
    }
}

fn clamp_logged(name: &str, value: f32, (min, max): (f32, f32)) -> f32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("{} = {} outside [{}, {}], using {}", name, value, min, max, clamped);
    }
    clamped
}

/// Slider ranges of the host's editing panel
#[derive(Debug, Clone, Copy)]
pub struct ParameterLimits {
    pub branch_length: (f32, f32),
    pub branch_starting_thickness: (f32, f32),
    pub ratio: (f32, f32),
    pub angle: (f32, f32),
    pub axis_rotation: (f32, f32),
    pub max_depth: u32,
    pub max_branches: u32,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        Self {
            branch_length: (1.0, 100.0),
            branch_starting_thickness: (0.1, 20.0),
            ratio: (0.01, 0.99),
            angle: (0.0, 180.0),
            axis_rotation: (0.0, 360.0),
            max_depth: 6,
            max_branches: 8,
        }
    }
}

/// How the root system's parameters are derived from the canopy's
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootScaling {
    pub length: f32,
    pub thickness: f32,
    pub angle: f32,
}

impl Default for RootScaling {
    fn default() -> Self {
        Self {
            length: 0.6,
            thickness: 0.8,
            angle: 1.25,
        }
    }
}

impl RootScaling {
    /// Independent parameter set for the root pass. Roots never carry leaves
    /// and never spawn their own roots.
    pub fn apply(&self, canopy: &GrowthParameters) -> GrowthParameters {
        GrowthParameters {
            branch_length: canopy.branch_length * self.length,
            branch_starting_thickness: canopy.branch_starting_thickness * self.thickness,
            angle: (canopy.angle * self.angle).min(180.0),
            roots: false,
            leafs: false,
            ..canopy.clone()
        }
    }
}
