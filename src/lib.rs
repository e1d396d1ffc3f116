use wasm_bindgen::prelude::*;

pub mod animation;
pub mod data;
pub mod error;
pub mod growth;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod scene;

pub use data::{Color, GrowthParameters};
pub use error::TreeError;

use animation::SpinAnimation;
use growth::TreeGrowth;
use interaction::{graft_branch, Ray, RayPicker};
use math::Mat4;
use mesh::{MeshParams, TreeMesher};
use scene::Container;

/// Install the panic hook and route `log` output to the browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // A second init (hot reload) finds the logger already set; keep the first
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: TreeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Generator state exposed to the host page.
///
/// The page owns the camera, the editing panel and the render loop; it edits
/// parameters here, calls `regenerate` on slider release, forwards
/// double-clicks, and uploads the vertex/index buffers it reads back.
#[wasm_bindgen]
pub struct BranchingTree {
    params: GrowthParameters,
    growth: TreeGrowth,
    mesher: TreeMesher,
    picker: RayPicker,
    spin: SpinAnimation,
    tree: Container,
    roots: Container,
}

#[wasm_bindgen]
impl BranchingTree {
    /// Create a generator seeded from the page's random source
    #[wasm_bindgen(constructor)]
    pub fn new() -> BranchingTree {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::with_seed(seed)
    }

    /// Create a generator with a fixed seed for reproducible random rotations
    #[wasm_bindgen]
    pub fn with_seed(seed: u64) -> BranchingTree {
        Self {
            params: GrowthParameters::default(),
            growth: TreeGrowth::new(seed),
            mesher: TreeMesher::new(MeshParams::default()),
            picker: RayPicker::new(),
            spin: SpinAnimation::default(),
            tree: Container::new("tree"),
            roots: Container::new("roots"),
        }
    }

    /// Replace the parameter set from a YAML preset
    #[wasm_bindgen]
    pub fn load_parameters(&mut self, yaml: &str) -> Result<(), JsValue> {
        self.load_preset(yaml).map_err(to_js)
    }

    /// Current parameters as YAML
    #[wasm_bindgen]
    pub fn parameters_yaml(&self) -> Result<String, JsValue> {
        self.params.to_yaml().map_err(to_js)
    }

    /// Write one parameter by its panel name
    #[wasm_bindgen]
    pub fn set_parameter(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.apply_parameter(name, value).map_err(to_js)
    }

    /// Read one parameter by its panel name, e.g. to sync a slider
    #[wasm_bindgen]
    pub fn get_parameter(&self, name: &str) -> Result<f64, JsValue> {
        self.params.field(name).map_err(to_js)
    }

    /// Clear both containers and rebuild them from the current parameters.
    /// Returns the number of tree segments.
    #[wasm_bindgen]
    pub fn regenerate(&mut self) -> usize {
        let report = self.growth.grow(&self.params, &mut self.tree, &mut self.roots);
        self.materialize();
        report.tree_segments
    }

    /// Advance the spin animation by `dt` seconds. Does nothing unless
    /// `animate` is set; returns whether the geometry changed.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.params.animate {
            return false;
        }
        let increment = self.spin.tick(dt, &mut [&mut self.tree, &mut self.roots]);
        if increment == 0.0 {
            return false;
        }
        self.materialize();
        true
    }

    /// Handle a double-click at screen coordinates. `view` and `projection`
    /// are the camera's column-major matrices. Returns whether a branch was
    /// grafted; a click that hits nothing is ignored.
    #[wasm_bindgen]
    pub fn double_click(
        &mut self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view: &[f32],
        projection: &[f32],
    ) -> bool {
        let (Some(view), Some(projection)) = (Mat4::from_slice(view), Mat4::from_slice(projection)) else {
            log::warn!("double_click needs two 16-element matrices");
            return false;
        };
        let ray = Ray::from_screen(screen_x, screen_y, screen_width, screen_height, &view, &projection);
        self.graft_along(&ray)
    }

    #[wasm_bindgen]
    pub fn tree_vertex_data(&self) -> Vec<f32> {
        self.tree.geometry().map(|m| m.vertex_data()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn tree_index_data(&self) -> Vec<u32> {
        self.tree.geometry().map(|m| m.index_data().to_vec()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn root_vertex_data(&self) -> Vec<f32> {
        self.roots.geometry().map(|m| m.vertex_data()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn root_index_data(&self) -> Vec<u32> {
        self.roots.geometry().map(|m| m.index_data().to_vec()).unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn segment_count(&self) -> usize {
        self.tree.segment_count()
    }
}

impl BranchingTree {
    pub fn parameters(&self) -> &GrowthParameters {
        &self.params
    }

    pub fn tree(&self) -> &Container {
        &self.tree
    }

    pub fn roots(&self) -> &Container {
        &self.roots
    }

    pub fn load_preset(&mut self, yaml: &str) -> error::Result<()> {
        self.params = GrowthParameters::from_yaml(yaml)?;
        Ok(())
    }

    pub fn apply_parameter(&mut self, name: &str, value: f64) -> error::Result<()> {
        let was_animating = self.params.animate;
        self.params.set_field(name, value)?;
        if self.params.animate && !was_animating {
            self.spin.reset();
        }
        Ok(())
    }

    /// Graft a branch where `ray` first hits the tree, viewed from the ray origin
    pub fn graft_along(&mut self, ray: &Ray) -> bool {
        let Some(event) = self.picker.pick(ray) else {
            return false;
        };
        let grafted = graft_branch(&mut self.tree, &event, ray.origin, self.params.branch_color);
        if grafted {
            self.materialize();
        }
        grafted
    }

    fn materialize(&mut self) {
        let segments = self.mesher.materialize(&mut self.tree);
        self.picker.set_segments(segments);
        self.mesher.materialize(&mut self.roots);
    }
}
