use super::Vec3;

/// 4x4 matrix for node transforms (column-major, as uploaded to WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn from_slice(values: &[f32]) -> Option<Self> {
        let data: [f32; 16] = values.try_into().ok()?;
        Some(Self { data })
    }

    pub fn translation(offset: Vec3) -> Self {
        let mut m = Self::identity();
        m.data[12] = offset.x;
        m.data[13] = offset.y;
        m.data[14] = offset.z;
        m
    }

    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Perspective projection matrix
    #[cfg(test)]
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    #[cfg(test)]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Inverse of a rotation + translation matrix.
    /// Only valid when the upper 3x3 block is orthonormal, which holds for every
    /// node transform in a generated tree.
    pub fn inverse_rigid(&self) -> Self {
        let m = &self.data;
        let mut inv = Self::identity();

        inv.data[0] = m[0];
        inv.data[1] = m[4];
        inv.data[2] = m[8];

        inv.data[4] = m[1];
        inv.data[5] = m[5];
        inv.data[6] = m[9];

        inv.data[8] = m[2];
        inv.data[9] = m[6];
        inv.data[10] = m[10];

        let t = Vec3::new(m[12], m[13], m[14]);
        let moved = inv.transform_direction(t);
        inv.data[12] = -moved.x;
        inv.data[13] = -moved.y;
        inv.data[14] = -moved.z;

        inv
    }

    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform_direction(p) + Vec3::new(self.data[12], self.data[13], self.data[14])
    }

    /// Transform a direction (ignores translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * d.x + self.data[4] * d.y + self.data[8] * d.z,
            self.data[1] * d.x + self.data[5] * d.y + self.data[9] * d.z,
            self.data[2] * d.x + self.data[6] * d.y + self.data[10] * d.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_translation() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        let result = m.transform_point(Vec3::ZERO);
        assert!(result.approx_eq(&Vec3::new(1.0, 2.0, 3.0), 0.0001));
    }

    #[test]
    fn test_rotation_z_tilts_up_toward_negative_x() {
        let m = Mat4::rotation_z(FRAC_PI_2);
        let result = m.transform_direction(Vec3::UP);
        assert!(result.approx_eq(&Vec3::new(-1.0, 0.0, 0.0), 0.0001));
    }

    #[test]
    fn test_rotation_x_half_turn_flips_up() {
        let m = Mat4::rotation_x(PI);
        let result = m.transform_direction(Vec3::UP);
        assert!(result.approx_eq(&Vec3::new(0.0, -1.0, 0.0), 0.0001));
    }

    #[test]
    fn test_rotation_y_keeps_up() {
        let m = Mat4::rotation_y(1.3);
        assert!(m.transform_direction(Vec3::UP).approx_eq(&Vec3::UP, 0.0001));
    }

    #[test]
    fn test_matrix_mul_applies_right_first() {
        let t = Mat4::translation(Vec3::new(0.0, 5.0, 0.0));
        let r = Mat4::rotation_z(FRAC_PI_2);
        let p = t.mul(&r).transform_point(Vec3::UP);
        assert!(p.approx_eq(&Vec3::new(-1.0, 5.0, 0.0), 0.0001));
    }

    #[test]
    fn test_inverse_rigid_round_trips() {
        let m = Mat4::translation(Vec3::new(3.0, -2.0, 7.0))
            .mul(&Mat4::rotation_y(0.7))
            .mul(&Mat4::rotation_z(1.1));
        let p = Vec3::new(0.5, 4.0, -1.5);
        let back = m.inverse_rigid().transform_point(m.transform_point(p));
        assert!(back.approx_eq(&p, 0.0001));
    }

    #[test]
    fn test_from_slice_requires_sixteen_values() {
        assert!(Mat4::from_slice(&[0.0; 15]).is_none());
        assert_eq!(Mat4::from_slice(&Mat4::identity().data), Some(Mat4::identity()));
    }
}
