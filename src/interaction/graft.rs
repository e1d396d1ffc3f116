use crate::data::Color;
use crate::growth::{build_segment, SegmentKind};
use crate::math::Vec3;
use crate::scene::{Container, Euler, SceneGroup};
use super::PickEvent;

/// Graft one terminal branch onto the picked segment's group, pointing from
/// the clicked spot toward the camera. Copies the picked segment's length and
/// start radius. Returns false when the pick no longer resolves to a node.
///
/// Grafts live only until the next regeneration clears the container.
pub fn graft_branch(container: &mut Container, event: &PickEvent, camera: Vec3, color: Color) -> bool {
    let Some(world) = container.world_matrix(&event.path) else {
        log::debug!("graft skipped: {:?} is not in '{}'", event.path, container.name);
        return false;
    };
    let to_local = world.inverse_rigid();
    let local_point = to_local.transform_point(event.world_point);
    let local_camera = to_local.transform_point(camera);

    let Some(node) = container.node_mut(&event.path) else {
        return false;
    };

    let built = build_segment(
        local_point,
        event.segment_start_radius,
        event.segment_length,
        color,
        SegmentKind::Branch,
        true,
    );
    let mut group = built.group.at_depth(node.depth + 1);
    group.transform.rotation = Euler::facing(local_camera - local_point);
    node.attach(group);

    log::debug!("grafted branch onto {:?} at {:?}", event.path, event.world_point);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::segment::taper;
    use crate::scene::NodePath;

    fn trunk() -> Container {
        let mut c = Container::new("tree");
        c.attach(build_segment(Vec3::ZERO, 2.0, 10.0, Color::WHITE, SegmentKind::Trunk, false).group);
        c
    }

    fn event(path: Vec<usize>) -> PickEvent {
        PickEvent {
            world_point: Vec3::new(0.0, 5.0, 2.0),
            segment_length: 10.0,
            segment_start_radius: 2.0,
            path: NodePath(path),
            distance: 1.0,
        }
    }

    #[test]
    fn test_graft_attaches_terminal_branch() {
        let mut c = trunk();
        assert!(graft_branch(&mut c, &event(vec![0]), Vec3::new(0.0, 5.0, 30.0), Color::WHITE));

        let grafted = c.node(&NodePath(vec![0, 0])).unwrap();
        assert_eq!(grafted.segment.kind, SegmentKind::Branch);
        assert_eq!(grafted.segment.length, 10.0);
        assert_eq!(grafted.segment.start_radius, 2.0);
        assert_eq!(grafted.segment.end_radius, taper(2.0, true));
        assert_eq!(grafted.depth, 1);
        assert_eq!(c.segment_count(), 2);
    }

    #[test]
    fn test_graft_faces_camera() {
        let mut c = trunk();
        let camera = Vec3::new(12.0, 20.0, 25.0);
        let ev = event(vec![0]);
        graft_branch(&mut c, &ev, camera, Color::WHITE);

        let path = NodePath(vec![0, 0]);
        let world = c.world_matrix(&path).unwrap();
        let base = world.transform_point(Vec3::ZERO);
        let tip = world.transform_point(c.node(&path).unwrap().segment.end_offset);

        assert!(base.approx_eq(&ev.world_point, 0.001));
        let expected = (camera - ev.world_point).normalize();
        assert!((tip - base).normalize().approx_eq(&expected, 0.001));
    }

    #[test]
    fn test_graft_under_rotated_parent() {
        let mut c = Container::new("roots");
        c.transform.rotation = Euler::flipped();
        let mut parent = build_segment(Vec3::ZERO, 1.0, 6.0, Color::WHITE, SegmentKind::Root, false).group;
        parent.transform.rotation = Euler::tilt_and_spin(60.0, 30.0);
        c.attach(parent);

        let camera = Vec3::new(-5.0, 3.0, 40.0);
        let ev = PickEvent { world_point: Vec3::new(1.0, -2.0, 0.5), ..event(vec![0]) };
        assert!(graft_branch(&mut c, &ev, camera, Color::WHITE));

        let path = NodePath(vec![0, 0]);
        let world = c.world_matrix(&path).unwrap();
        let base = world.transform_point(Vec3::ZERO);
        let dir = world.transform_direction(Vec3::UP);
        assert!(base.approx_eq(&ev.world_point, 0.001));
        assert!(dir.approx_eq(&(camera - ev.world_point).normalize(), 0.001));
    }

    #[test]
    fn test_stale_path_is_noop() {
        let mut c = trunk();
        assert!(!graft_branch(&mut c, &event(vec![3, 1]), Vec3::ZERO, Color::WHITE));
        assert_eq!(c.segment_count(), 1);
    }
}
