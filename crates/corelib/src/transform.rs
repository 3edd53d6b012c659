use crate::{CoreError, CoreResult, EulerRot, Mat3, Mat4, Quat, Vec3, Vec4};

/// Affine transform for decoded vertex attributes stored as flat float
/// slices. The normal matrix is derived once at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    matrix: Mat4,
    normal_matrix: Mat3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
        normal_matrix: Mat3::IDENTITY,
    };

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self {
            matrix,
            normal_matrix: Mat3::from_mat4(matrix).inverse().transpose(),
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(translation))
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale(scale))
    }

    /// Rotation from Euler angles in radians, XYZ order.
    pub fn from_euler_xyz(angles: Vec3) -> Self {
        let q = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
        Self::from_matrix(Mat4::from_quat(q))
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Transform) -> Self {
        Self::from_matrix(next.matrix * self.matrix)
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Transform a 3- or 4-component position in place. Three components are
    /// treated as `w = 1`; a fourth component is carried through the matrix.
    pub fn apply_to_position(&self, position: &mut [f32]) -> CoreResult<()> {
        match position.len() {
            3 => {
                let p = self.matrix.transform_point3(Vec3::from_slice(position));
                position.copy_from_slice(&p.to_array());
            }
            4 => {
                let p = self.matrix * Vec4::from_slice(position);
                position.copy_from_slice(&p.to_array());
            }
            actual => {
                return Err(CoreError::ComponentCount {
                    expected: "3 or 4",
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Transform a normal in place by the inverse-transpose and renormalize
    /// it. A fourth component, when present, is left untouched.
    pub fn apply_to_normal(&self, normal: &mut [f32]) -> CoreResult<()> {
        if !(3..=4).contains(&normal.len()) {
            return Err(CoreError::ComponentCount {
                expected: "3 or 4",
                actual: normal.len(),
            });
        }
        let n = (self.normal_matrix * Vec3::from_slice(&normal[..3])).normalize_or_zero();
        normal[..3].copy_from_slice(&n.to_array());
        Ok(())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
