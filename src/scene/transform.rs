use std::f32::consts::PI;
use crate::math::{Mat4, Vec3};

/// Rotation in radians, applied in X, Y, Z order (`Rx * Ry * Rz`)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Euler = Euler { x: 0.0, y: 0.0, z: 0.0 };

    /// Tilt off the local Y axis (about Z), then spin about Y
    pub fn tilt_and_spin(tilt_degrees: f32, spin_degrees: f32) -> Self {
        Self {
            x: 0.0,
            y: spin_degrees.to_radians(),
            z: tilt_degrees.to_radians(),
        }
    }

    /// Half turn about X, used to grow a subtree downward
    pub fn flipped() -> Self {
        Self { x: PI, y: 0.0, z: 0.0 }
    }

    /// Rotation that carries local +Y onto `direction`, expressed as a tilt
    /// and spin so it composes like any generated branch.
    pub fn facing(direction: Vec3) -> Self {
        let d = direction.normalize();
        if d.length_squared() == 0.0 {
            return Self::IDENTITY;
        }
        Self {
            x: 0.0,
            y: d.z.atan2(-d.x),
            z: d.y.clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.x)
            .mul(&Mat4::rotation_y(self.y))
            .mul(&Mat4::rotation_z(self.z))
    }
}

/// Placement of a node inside its parent's frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Euler,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Euler::IDENTITY,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Euler::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position).mul(&self.rotation.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Transform::IDENTITY.matrix(), Mat4::identity());
    }

    #[test]
    fn test_tilt_only_leans_toward_negative_x() {
        let m = Euler::tilt_and_spin(90.0, 0.0).matrix();
        assert!(m.transform_direction(Vec3::UP).approx_eq(&Vec3::new(-1.0, 0.0, 0.0), 0.0001));
    }

    #[test]
    fn test_spin_preserves_tilt_angle() {
        for spin in [0.0, 45.0, 192.0, 300.0] {
            let dir = Euler::tilt_and_spin(60.0, spin).matrix().transform_direction(Vec3::UP);
            assert!((dir.y - 60.0f32.to_radians().cos()).abs() < 0.0001);
        }
    }

    #[test]
    fn test_flipped_points_down() {
        let dir = Euler::flipped().matrix().transform_direction(Vec3::UP);
        assert!(dir.approx_eq(&Vec3::new(0.0, -1.0, 0.0), 0.0001));
    }

    #[test]
    fn test_facing_reaches_direction() {
        let targets = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.3, -0.5, 0.8),
            Vec3::new(-2.0, 1.0, 1.0),
        ];
        for target in targets {
            let got = Euler::facing(target).matrix().transform_direction(Vec3::UP);
            assert!(got.approx_eq(&target.normalize(), 0.0001), "{:?} vs {:?}", got, target);
        }
    }

    #[test]
    fn test_transform_places_then_rotates() {
        let t = Transform::at(Vec3::new(0.0, 10.0, 0.0)).with_rotation(Euler::tilt_and_spin(90.0, 0.0));
        let p = t.matrix().transform_point(Vec3::along_y(2.0));
        assert!(p.approx_eq(&Vec3::new(-2.0, 10.0, 0.0), 0.0001));
    }
}
