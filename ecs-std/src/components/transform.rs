use glam::{Mat4, Quat, Vec3};
use ember_core::scene::NodeTransform;

/// Local transform of an imported node, in glam types.
///
/// Padding fields (`_pad*`) keep the struct `bytemuck::Pod`, since `Quat`
/// is 16-byte aligned on SIMD targets. The renderer uploads it as is.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Transform {
    pub translation: Vec3,
    _pad0: f32,
    /// Unit quaternion.
    pub rotation: Quat,
    pub scale: Vec3,
    _pad1: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        _pad0: 0.0,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        _pad1: 0.0,
    };

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            _pad0: 0.0,
            rotation,
            scale,
            _pad1: 0.0,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Model matrix (T * R * S).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<NodeTransform> for Transform {
    fn from(t: NodeTransform) -> Self {
        Self::new(
            Vec3::from(t.translation),
            Quat::from_array(t.rotation),
            Vec3::from(t.scale),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::IDENTITY.to_matrix(), Mat4::IDENTITY);
        assert_eq!(Transform::default(), Transform::IDENTITY);
    }

    #[test]
    fn from_node_transform() {
        let rotation = Quat::from_rotation_y(FRAC_PI_2);
        let node = NodeTransform::IDENTITY
            .with_translation([1.0, 2.0, 3.0])
            .with_rotation(rotation.to_array())
            .with_scale([2.0, 2.0, 2.0]);

        let t = Transform::from(node);
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
        assert!((t.rotation - rotation).length() < 1e-6);
        assert_eq!(t.scale, Vec3::splat(2.0));
    }

    #[test]
    fn matrix_carries_translation() {
        let t = Transform::from_translation(Vec3::new(5.0, 10.0, 15.0));
        let position = t.to_matrix().w_axis.truncate();
        assert!((position - Vec3::new(5.0, 10.0, 15.0)).length() < 1e-6);
    }

    #[test]
    fn pod_size() {
        assert_eq!(std::mem::size_of::<Transform>(), 48);
        let bytes = bytemuck::bytes_of(&Transform::IDENTITY);
        assert_eq!(bytes.len(), 48);
    }
}
