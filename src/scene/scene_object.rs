use crate::core::math::transform::TransformFactory;
use crate::scene::material::MaterialId;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;

/// Represents an instance of a mesh in the scene with its own transformation.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Arc<Mesh>,
    pub material: MaterialId,
    pub position: Vector3<f32>,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>, material: MaterialId) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            visible: true,
        }
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        TransformFactory::compose(&self.position, &self.rotation, &self.scale)
    }
}
