//! Math utilities and types
//!
//! The engine is 2D, but transforms are built as 4x4 matrices so they can be
//! handed to the graphics backend unchanged.

pub use nalgebra::{Vector2, Vector3, Vector4, Matrix4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (used for RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Spatial state of a game object: position, rotation (radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position in world units
    pub position: Vec2,

    /// Rotation around the Z axis in radians
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a transform with only position
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Default::default()
        }
    }

    /// Model matrix: translate, then scale, then rotate around Z
    pub fn to_matrix(&self) -> Mat4 {
        let translation = Mat4::new_translation(&Vec3::new(self.position.x, self.position.y, 0.0));
        let scale = Mat4::new_nonuniform_scaling(&Vec3::new(self.scale.x, self.scale.y, 1.0));
        let rotation = Mat4::new_rotation(Vec3::new(0.0, 0.0, self.rotation));
        translation * scale * rotation
    }
}

/// Orthographic 2D projection bounds
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrthoBounds {
    /// Left edge in world units
    pub left: f32,
    /// Right edge in world units
    pub right: f32,
    /// Bottom edge in world units
    pub bottom: f32,
    /// Top edge in world units
    pub top: f32,
}

impl Default for OrthoBounds {
    fn default() -> Self {
        Self {
            left: -20.0,
            right: 20.0,
            bottom: -15.0,
            top: 15.0,
        }
    }
}

impl OrthoBounds {
    /// Projection matrix with a [-1, 1] depth range
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_orthographic(self.left, self.right, self.bottom, self.top, -1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_transform_matrix() {
        let transform = Transform2D::default();
        assert_relative_eq!(transform.to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_maps_origin_to_position() {
        let mut transform = Transform2D::from_position(3.0, -2.0);
        transform.scale = Vec2::new(2.0, 2.0);
        transform.rotation = std::f32::consts::FRAC_PI_2;

        let origin = transform.to_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin, Vec4::new(3.0, -2.0, 0.0, 1.0), epsilon = EPSILON);

        // Rotation is applied before scale, so +X ends up on +Y scaled by 2
        let unit_x = transform.to_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(unit_x, Vec4::new(3.0, 0.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_ortho_bounds_map_to_clip_space() {
        let projection = OrthoBounds::default().to_matrix();
        let corner = projection * Vec4::new(20.0, 15.0, 0.0, 1.0);
        assert_relative_eq!(corner, Vec4::new(1.0, 1.0, 0.0, 1.0), epsilon = EPSILON);
    }
}
