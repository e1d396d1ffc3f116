use rand::Rng;
use crate::data::GrowthParameters;
use crate::math::Vec3;
use crate::scene::{Euler, SceneGroup};
use super::{build_segment, Leaf, SegmentKind};

/// Which pass is running: the canopy (trunk, leaves) or the mirrored roots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthAxis {
    Canopy,
    Roots,
}

impl GrowthAxis {
    pub fn is_primary(self) -> bool {
        self == GrowthAxis::Canopy
    }
}

/// Values threaded through one level of recursion. Every call gets its own
/// copy; nothing is shared or restored across calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthState {
    /// Recursion level, 0 at the trunk/root origin
    pub depth: u32,
    /// Where the level starts, in the parent group's frame
    pub origin: Vec3,
    pub radius: f32,
    pub length: f32,
}

impl GrowthState {
    /// Level 0 of a pass, seeded from the editor's starting length and thickness
    pub fn initial(params: &GrowthParameters) -> Self {
        Self {
            depth: 0,
            origin: Vec3::ZERO,
            radius: params.branch_starting_thickness,
            length: params.branch_length,
        }
    }
}

/// Recursive stem/branch generator
///
/// Each level lays a chain of stems up the current axis and, beside every
/// stem, one branch tilted off the axis by `angle` and spun about it. Only
/// branches recurse, so a level with `b` siblings feeds `b` sub-levels.
pub struct BranchGenerator<'a, R: Rng> {
    params: &'a GrowthParameters,
    axis: GrowthAxis,
    rng: &'a mut R,
}

impl<'a, R: Rng> BranchGenerator<'a, R> {
    pub fn new(params: &'a GrowthParameters, axis: GrowthAxis, rng: &'a mut R) -> Self {
        Self { params, axis, rng }
    }

    /// Populate `parent` with the subtree for `state`
    pub fn generate<G: SceneGroup>(&mut self, parent: &mut G, state: GrowthState, branch_count: u32) {
        let params = self.params;
        let primary = self.axis.is_primary();
        let color = params.branch_color;

        let mut position = state.origin;
        let mut radius = state.radius;

        // The trunk is laid before the terminal check so depth 0 still has one
        if state.depth == 0 && primary {
            let trunk = build_segment(position, radius, state.length, color, SegmentKind::Trunk, false);
            position += trunk.end_position;
            radius = trunk.end_radius;
            parent.attach(trunk.group);
        }

        if state.depth >= params.depth {
            if primary && params.leafs {
                parent.attach_leaf(Leaf::at_depth(position, state.depth, color));
            }
            return;
        }

        let branch_kind = if primary { SegmentKind::Branch } else { SegmentKind::Root };
        let last_level = state.depth + 1 == params.depth;

        for i in 1..=branch_count {
            let exponent = (i + state.depth) as i32;
            let last_sibling = i == branch_count;

            let stem_length = state.length * params.stem_to_stem_ratio.powi(exponent);
            let stem = build_segment(position, radius, stem_length, color, SegmentKind::Stem, last_sibling);

            let branch_length = state.length * params.stem_to_branch_ratio.powi(exponent);
            let mut branch = build_segment(position, radius, branch_length, color, branch_kind, last_level);

            if !last_sibling {
                radius = stem.end_radius;
            }
            position += Vec3::along_y(stem.group.segment.length);

            let spin = self.axis_rotation(i);
            branch.group.transform.rotation = Euler::tilt_and_spin(params.angle, spin);

            let mut branch_group = branch.group.at_depth(state.depth);
            let next = GrowthState {
                depth: state.depth + 1,
                origin: branch.end_position,
                radius: branch.end_radius,
                length: branch_length,
            };
            self.generate(&mut branch_group, next, branch_count);

            parent.attach(stem.group.at_depth(state.depth));
            parent.attach(branch_group);
        }
    }

    /// Spin about the growth axis for sibling `i`, in degrees. Fixed
    /// increments are not wrapped to 360.
    fn axis_rotation(&mut self, sibling: u32) -> f32 {
        let increment = self.params.axis_rotation;
        if self.params.enable_random_axis_rotation {
            let span = increment.abs();
            self.rng.gen_range(-span..=span)
        } else {
            sibling as f32 * increment
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use crate::growth::{BranchNode, MIN_RADIUS};
    use crate::growth::segment::taper;
    use crate::scene::Container;

    fn grow(params: &GrowthParameters, axis: GrowthAxis, seed: u64) -> Container {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut container = Container::new("test");
        let mut generator = BranchGenerator::new(params, axis, &mut rng);
        generator.generate(&mut container, GrowthState::initial(params), params.branches);
        container
    }

    fn count_kind(container: &Container, kind: SegmentKind) -> usize {
        container
            .iter_with_paths()
            .filter(|(_, n)| n.segment.kind == kind)
            .count()
    }

    fn nodes(container: &Container) -> Vec<&BranchNode> {
        container.iter_with_paths().map(|(_, n)| n).collect()
    }

    #[test]
    fn test_depth_zero_is_lone_trunk() {
        let params = GrowthParameters { depth: 0, branches: 1, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);

        assert_eq!(tree.segment_count(), 1);
        assert_eq!(tree.children()[0].segment.kind, SegmentKind::Trunk);
        assert_eq!(count_kind(&tree, SegmentKind::Branch), 0);
        assert_eq!(tree.leaf_count(), 0);
    }

    #[test]
    fn test_two_levels_with_leaves() {
        let params = GrowthParameters { depth: 2, branches: 2, leafs: true, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);

        assert_eq!(count_kind(&tree, SegmentKind::Branch), 6);
        assert_eq!(count_kind(&tree, SegmentKind::Stem), 6);
        assert_eq!(count_kind(&tree, SegmentKind::Trunk), 1);
        assert_eq!(tree.leaf_count(), 4);

        for node in nodes(&tree) {
            if let Some(leaf) = &node.leaf {
                assert_eq!(node.segment.kind, SegmentKind::Branch);
                assert_eq!(node.depth, 1);
                assert_eq!(leaf.depth, 2);
                assert_eq!(leaf.transform.position, node.segment.end_offset);
            }
        }
    }

    #[test]
    fn test_segment_count_depends_on_depth_and_branches_only() {
        for depth in 0..=3u32 {
            for branches in 0..=3u32 {
                let expected: usize = (1..=depth).map(|d| (branches as usize).pow(d)).sum();
                let params = GrowthParameters {
                    depth,
                    branches,
                    angle: 17.0 * depth as f32,
                    ..Default::default()
                };
                let tree = grow(&params, GrowthAxis::Canopy, 9);
                assert_eq!(count_kind(&tree, SegmentKind::Branch), expected);
                assert_eq!(count_kind(&tree, SegmentKind::Stem), expected);
                assert_eq!(tree.segment_count(), 2 * expected + 1);
            }
        }
    }

    #[test]
    fn test_fixed_axis_rotation_per_sibling() {
        let params = GrowthParameters {
            depth: 1,
            branches: 3,
            axis_rotation: 90.0,
            ..Default::default()
        };
        let tree = grow(&params, GrowthAxis::Canopy, 1);

        let spins: Vec<f32> = tree
            .children()
            .iter()
            .filter(|n| n.segment.kind == SegmentKind::Branch)
            .map(|n| n.transform.rotation.y.to_degrees())
            .collect();
        assert_eq!(spins.len(), 3);
        for (spin, expected) in spins.iter().zip([90.0, 180.0, 270.0]) {
            assert!((spin - expected).abs() < 0.001, "{} vs {}", spin, expected);
        }
    }

    #[test]
    fn test_fixed_rotation_is_not_wrapped() {
        let params = GrowthParameters { depth: 1, branches: 3, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        let last = tree.children().last().unwrap();
        assert!((last.transform.rotation.y.to_degrees() - 576.0).abs() < 0.01);
    }

    #[test]
    fn test_random_rotation_within_range_and_seeded() {
        let params = GrowthParameters {
            depth: 2,
            branches: 4,
            axis_rotation: 45.0,
            enable_random_axis_rotation: true,
            ..Default::default()
        };
        let a = grow(&params, GrowthAxis::Canopy, 7);
        let b = grow(&params, GrowthAxis::Canopy, 7);
        assert_eq!(a.children(), b.children());

        let spins: Vec<f32> = nodes(&a)
            .iter()
            .filter(|n| n.segment.kind == SegmentKind::Branch)
            .map(|n| n.transform.rotation.y.to_degrees())
            .collect();
        assert!(spins.iter().all(|s| s.abs() <= 45.001));
        assert!(spins.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_deterministic_passes_are_identical() {
        let params = GrowthParameters { depth: 3, branches: 3, ..Default::default() };
        let a = grow(&params, GrowthAxis::Canopy, 1);
        let b = grow(&params, GrowthAxis::Canopy, 2);
        assert_eq!(a.children(), b.children());
    }

    #[test]
    fn test_radii_never_taper_outward() {
        let params = GrowthParameters { depth: 3, branches: 4, leafs: true, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);

        for node in nodes(&tree) {
            let s = &node.segment;
            assert!(s.start_radius >= MIN_RADIUS);
            assert!(s.end_radius >= MIN_RADIUS);
            assert!(s.end_radius < s.start_radius || s.end_radius <= MIN_RADIUS);
        }
    }

    #[test]
    fn test_last_sibling_stem_tapers_steeply() {
        let params = GrowthParameters {
            depth: 1,
            branches: 2,
            branch_starting_thickness: 20.0,
            ..Default::default()
        };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        let stems: Vec<_> = tree
            .children()
            .iter()
            .filter(|n| n.segment.kind == SegmentKind::Stem)
            .collect();

        assert_eq!(stems.len(), 2);
        assert_eq!(stems[0].segment.end_radius, taper(stems[0].segment.start_radius, false));
        assert_eq!(stems[1].segment.end_radius, taper(stems[1].segment.start_radius, true));
        assert!(stems[1].segment.end_radius < stems[0].segment.end_radius);
    }

    #[test]
    fn test_last_level_branches_taper_to_tips() {
        let params = GrowthParameters { depth: 2, branches: 2, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);

        let branches: Vec<_> = nodes(&tree)
            .into_iter()
            .filter(|n| n.segment.kind == SegmentKind::Branch)
            .collect();
        assert_eq!(branches.iter().filter(|n| n.depth == 0).count(), 2);
        assert_eq!(branches.iter().filter(|n| n.depth == 1).count(), 4);

        for branch in branches {
            let s = &branch.segment;
            let last_level = branch.depth + 1 == params.depth;
            assert_eq!(s.end_radius, taper(s.start_radius, last_level), "depth {}", branch.depth);
        }
    }

    #[test]
    fn test_stems_stack_up_the_axis() {
        let params = GrowthParameters { depth: 1, branches: 2, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        let children = tree.children();

        let kinds: Vec<_> = children.iter().map(|n| n.segment.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Trunk,
                SegmentKind::Stem,
                SegmentKind::Branch,
                SegmentKind::Stem,
                SegmentKind::Branch,
            ]
        );

        assert!((children[1].transform.position.y - 50.0).abs() < 0.001);
        assert!((children[1].segment.length - 40.0).abs() < 0.001);
        assert!((children[2].segment.length - 45.0).abs() < 0.001);
        assert!((children[3].transform.position.y - 90.0).abs() < 0.001);
        assert!((children[3].segment.length - 32.0).abs() < 0.001);
        assert_eq!(children[2].transform.position, children[1].transform.position);
    }

    #[test]
    fn test_branches_tilt_by_angle() {
        let params = GrowthParameters { depth: 2, branches: 3, angle: 35.0, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        for node in nodes(&tree) {
            match node.segment.kind {
                SegmentKind::Branch => {
                    assert!((node.transform.rotation.z.to_degrees() - 35.0).abs() < 0.001)
                }
                _ => assert_eq!(node.transform.rotation.z, 0.0),
            }
        }
    }

    #[test]
    fn test_depth_bound() {
        let params = GrowthParameters { depth: 3, branches: 2, leafs: true, ..Default::default() };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        for node in nodes(&tree) {
            assert!(node.depth < params.depth);
            if let Some(leaf) = &node.leaf {
                assert!(leaf.depth <= params.depth + 1);
            }
        }
    }

    #[test]
    fn test_root_pass_has_no_trunk_or_leaves() {
        let params = GrowthParameters { depth: 2, branches: 2, leafs: true, ..Default::default() };
        let roots = grow(&params, GrowthAxis::Roots, 1);

        assert_eq!(count_kind(&roots, SegmentKind::Trunk), 0);
        assert_eq!(count_kind(&roots, SegmentKind::Root), 6);
        assert_eq!(count_kind(&roots, SegmentKind::Branch), 0);
        assert_eq!(roots.leaf_count(), 0);
    }

    #[test]
    fn test_degenerate_parameters() {
        let params = GrowthParameters {
            depth: 2,
            branches: 0,
            branch_length: 0.0,
            leafs: true,
            ..Default::default()
        };
        let tree = grow(&params, GrowthAxis::Canopy, 1);
        assert_eq!(tree.segment_count(), 1);
        assert_eq!(tree.leaf_count(), 0);
    }
}
