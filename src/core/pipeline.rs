use crate::core::geometry::Vertex;
use nalgebra::Vector4;
use std::ops::{Add, Mul};

/// Trait for types that can be linearly interpolated across a triangle's surface.
///
/// `Add + Mul<f32>` cover the barycentric combination `a * wa + b * wb + c * wc`;
/// `Send + Sync` lets the rasterizer shade rows in parallel.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl<T> Interpolatable for T where
    T: Copy + Clone + Add<Output = T> + Mul<f32, Output = T> + Send + Sync
{
}

/// The programmable stages of the pipeline.
///
/// A shader is built per draw call, so it carries its own matrices and
/// material parameters.
pub trait Shader: Send + Sync {
    /// Per-vertex outputs interpolated for each fragment.
    type Varying: Interpolatable;

    /// Transforms a vertex into homogeneous clip space and emits its varying.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Computes the straight-alpha RGBA color of a fragment, already encoded for
    /// display. Returning `None` discards the fragment (no depth write).
    fn fragment(&self, varying: Self::Varying) -> Option<Vector4<f32>>;
}
