use rand::rngs::SmallRng;
use rand::SeedableRng;
use crate::data::{GrowthParameters, ParameterLimits, RootScaling};
use crate::scene::{Container, Euler, Released, Transform};
use super::{BranchGenerator, GrowthAxis, GrowthState};

/// What one regeneration pass tore down and built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthReport {
    pub released_tree: Released,
    pub released_roots: Released,
    pub tree_segments: usize,
    pub root_segments: usize,
    pub leaves: usize,
}

/// Clear-and-regenerate driver for the tree and root containers.
///
/// Holds no tree state between passes; only the random source carries over,
/// so repeated passes with random axis rotation keep scattering differently.
pub struct TreeGrowth {
    pub limits: ParameterLimits,
    pub root_scaling: RootScaling,
    rng: SmallRng,
}

impl TreeGrowth {
    pub fn new(seed: u64) -> Self {
        Self {
            limits: ParameterLimits::default(),
            root_scaling: RootScaling::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn with_root_scaling(mut self, scaling: RootScaling) -> Self {
        self.root_scaling = scaling;
        self
    }

    pub fn with_limits(mut self, limits: ParameterLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Rebuild both containers from scratch. The roots container is always
    /// cleared and is only repopulated when `params.roots` is set.
    pub fn grow(
        &mut self,
        params: &GrowthParameters,
        tree: &mut Container,
        roots: &mut Container,
    ) -> GrowthReport {
        let params = params.clamped(&self.limits);

        let released_tree = tree.clear();
        let released_roots = roots.clear();

        BranchGenerator::new(&params, GrowthAxis::Canopy, &mut self.rng).generate(
            tree,
            GrowthState::initial(&params),
            params.branches,
        );

        roots.transform = Transform::IDENTITY.with_rotation(Euler::flipped());
        if params.roots {
            let root_params = self.root_scaling.apply(&params);
            BranchGenerator::new(&root_params, GrowthAxis::Roots, &mut self.rng).generate(
                roots,
                GrowthState::initial(&root_params),
                root_params.branches,
            );
        }

        let report = GrowthReport {
            released_tree,
            released_roots,
            tree_segments: tree.segment_count(),
            root_segments: roots.segment_count(),
            leaves: tree.leaf_count(),
        };
        log::debug!(
            "regenerated tree: {} segments, {} roots, {} leaves (released {} + {} nodes)",
            report.tree_segments,
            report.root_segments,
            report.leaves,
            released_tree.nodes,
            released_roots.nodes
        );
        report
    }
}
