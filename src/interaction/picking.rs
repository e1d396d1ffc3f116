use crate::math::{Mat4, Vec3};
use crate::mesh::SegmentMeshInfo;
use crate::scene::NodePath;

/// A double-click resolved against one generated segment
#[derive(Debug, Clone, PartialEq)]
pub struct PickEvent {
    pub world_point: Vec3,
    pub segment_length: f32,
    pub segment_start_radius: f32,
    /// Node that owns the picked segment
    pub path: NodePath,
    pub distance: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// World ray under a screen position, starting at the camera
    pub fn from_screen(
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
        view: &Mat4,
        projection: &Mat4,
    ) -> Self {
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        // Perspective only scales x/y by the focal terms, so the view-space
        // direction through the near plane comes straight from them
        let ray_view = Vec3::new(ndc_x / projection.data[0], ndc_y / projection.data[5], -1.0);

        let inv_view = view.inverse_rigid();
        Self::new(inv_view.transform_point(Vec3::ZERO), inv_view.transform_direction(ray_view))
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction.scale(distance)
    }
}

/// Ray-based picking against generated segments
#[derive(Debug, Default)]
pub struct RayPicker {
    segments: Vec<SegmentMeshInfo>,
}

impl RayPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pickable segments, usually right after materializing
    pub fn set_segments(&mut self, segments: Vec<SegmentMeshInfo>) {
        self.segments = segments;
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Closest segment surface along `ray`, if any. Bounding spheres reject
    /// most segments before the exact test against the tapered cylinder.
    pub fn pick(&self, ray: &Ray) -> Option<PickEvent> {
        self.segments
            .iter()
            .filter(|segment| {
                ray_sphere_intersect(ray, segment.bounds_center, segment.bounds_radius).is_some()
            })
            .filter_map(|segment| ray_segment_intersect(ray, segment).map(|distance| (distance, segment)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, segment)| PickEvent {
                world_point: ray.at(distance),
                segment_length: segment.length,
                segment_start_radius: segment.start_radius,
                path: segment.path.clone(),
                distance,
            })
    }
}

/// Distance along the ray to the first sphere crossing in front of the origin
fn ray_sphere_intersect(ray: &Ray, sphere_center: Vec3, sphere_radius: f32) -> Option<f32> {
    let oc = ray.origin - sphere_center;

    let a = ray.direction.dot(&ray.direction);
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.dot(&oc) - sphere_radius * sphere_radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    [(-b - root) / (2.0 * a), (-b + root) / (2.0 * a)]
        .into_iter()
        .find(|t| *t > 0.0)
}

/// Distance along the ray to the nearest point on a segment's surface: the
/// tapered side between y = 0 and y = length, or either end cap.
fn ray_segment_intersect(ray: &Ray, segment: &SegmentMeshInfo) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    // Node frames are rigid, so distances along the local ray match world ones
    let to_local = segment.world.inverse_rigid();
    let o = to_local.transform_point(ray.origin);
    let d = to_local.transform_direction(ray.direction);

    let length = segment.length;
    let slope = (segment.end_radius - segment.start_radius) / length;

    // Side: x^2 + z^2 = (r0 + slope * y)^2 with y = o.y + t * d.y
    let radius_at_origin = segment.start_radius + slope * o.y;
    let radius_rate = slope * d.y;
    let qa = d.x * d.x + d.z * d.z - radius_rate * radius_rate;
    let qb = 2.0 * (o.x * d.x + o.z * d.z - radius_at_origin * radius_rate);
    let qc = o.x * o.x + o.z * o.z - radius_at_origin * radius_at_origin;

    let side = if qa.abs() > EPSILON {
        let discriminant = qb * qb - 4.0 * qa * qc;
        if discriminant < 0.0 {
            [None, None]
        } else {
            let root = discriminant.sqrt();
            [Some((-qb - root) / (2.0 * qa)), Some((-qb + root) / (2.0 * qa))]
        }
    } else if qb.abs() > EPSILON {
        [Some(-qc / qb), None]
    } else {
        [None, None]
    };
    let on_side = |t: &f32| {
        let y = o.y + t * d.y;
        (0.0..=length).contains(&y) && radius_at_origin + t * radius_rate >= 0.0
    };

    let caps = [(0.0, segment.start_radius), (length, segment.end_radius)].map(|(y, radius)| {
        if d.y.abs() <= EPSILON {
            return None;
        }
        let t = (y - o.y) / d.y;
        let p = o + d.scale(t);
        (p.x * p.x + p.z * p.z <= radius * radius).then_some(t)
    });

    side.into_iter()
        .flatten()
        .filter(on_side)
        .chain(caps.into_iter().flatten())
        .filter(|t| *t > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}
