use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// Colors fragments by their view-space normal, mapped from [-1, 1] to [0, 1].
pub struct NormalShader {
    /// Model-View-Projection matrix.
    pub mvp_matrix: Matrix4<f32>,
    /// Inverse transpose of the model-view matrix' upper 3x3.
    pub normal_matrix: Matrix3<f32>,
    pub opacity: f32,
}

impl NormalShader {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>, opacity: f32) -> Self {
        let model_view = view * model;
        let upper = model_view.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = upper.try_inverse().map(|m| m.transpose()).unwrap_or(upper);

        Self {
            mvp_matrix: projection * model_view,
            normal_matrix,
            opacity,
        }
    }
}

impl Shader for NormalShader {
    /// View-space normal.
    type Varying = Vector3<f32>;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        // 1. Transform position to Clip Space
        let clip_pos = self.mvp_matrix * vertex.position.to_homogeneous();

        // 2. Pass the view-space normal; it is renormalized per fragment
        let normal = self.normal_matrix * vertex.normal;

        (clip_pos, normal)
    }

    fn fragment(&self, varying: Self::Varying) -> Option<Vector4<f32>> {
        if self.opacity <= 0.0 {
            return None;
        }
        let n = varying.try_normalize(1e-9)?;
        let color = (n + Vector3::new(1.0, 1.0, 1.0)) * 0.5;
        Some(Vector4::new(color.x, color.y, color.z, self.opacity))
    }
}
