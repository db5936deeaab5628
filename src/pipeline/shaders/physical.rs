use crate::core::color::{linear_to_srgb, srgb_to_linear};
use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::scene::light::Light;
use crate::scene::material::PhysicalMaterial;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Data that needs to be interpolated across the triangle surface.
#[derive(Clone, Copy, Debug)]
pub struct PhysicalVarying {
    /// Normal vector in World Space.
    pub normal: Vector3<f32>,
    /// Position in World Space (needed for the view and light vectors).
    pub world_pos: Point3<f32>,
}

// nalgebra's Point3 doesn't add to Point3, so go through coordinates.
impl Add for PhysicalVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: Point3::from(self.world_pos.coords + other.world_pos.coords),
        }
    }
}

impl Mul<f32> for PhysicalVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: Point3::from(self.world_pos.coords * scalar),
        }
    }
}

/// Metallic-roughness shading lit by the scene lights, with an optional
/// environment reflection.
pub struct PhysicalShader<'a> {
    pub model_matrix: Matrix4<f32>,
    pub normal_matrix: Matrix3<f32>,
    pub mvp_matrix: Matrix4<f32>,
    pub camera_pos: Point3<f32>,
    pub lights: &'a [Light],
    pub material: &'a PhysicalMaterial,
    pub opacity: f32,
}

impl<'a> PhysicalShader<'a> {
    pub fn new(
        model: Matrix4<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        camera_pos: Point3<f32>,
        lights: &'a [Light],
        material: &'a PhysicalMaterial,
        opacity: f32,
    ) -> Self {
        let upper = model.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = upper.try_inverse().map(|m| m.transpose()).unwrap_or(upper);

        Self {
            model_matrix: model,
            normal_matrix,
            mvp_matrix: projection * view * model,
            camera_pos,
            lights,
            material,
            opacity,
        }
    }
}

impl Shader for PhysicalShader<'_> {
    type Varying = PhysicalVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        // 1. Transform Position to World Space
        let world_pos = self.model_matrix.transform_point(&vertex.position);

        // 2. Transform Normal to World Space
        let normal = self.normal_matrix * vertex.normal;

        // 3. Transform Position to Clip Space (MVP)
        let clip_pos = self.mvp_matrix * vertex.position.to_homogeneous();

        (clip_pos, PhysicalVarying { normal, world_pos })
    }

    fn fragment(&self, varying: Self::Varying) -> Option<Vector4<f32>> {
        if self.opacity <= 0.0 {
            return None;
        }
        let m = self.material;

        // 1. Surface parameters
        let n = varying.normal.try_normalize(1e-9)?;
        let v = (self.camera_pos - varying.world_pos).try_normalize(1e-9)?;
        let base = srgb_to_linear(m.color);
        let metalness = m.metalness.clamp(0.0, 1.0);
        let roughness = m.roughness.clamp(0.04, 1.0);
        let diffuse_color = base * (1.0 - metalness);
        let dielectric_f0 = Vector3::repeat(0.16 * m.reflectivity * m.reflectivity);
        let f0 = dielectric_f0.lerp(&base, metalness);

        // 2. Direct lighting
        let shininess = (2.0 / roughness.powi(4) - 2.0).max(1.0);
        let mut result = Vector3::zeros();
        for light in self.lights {
            let irradiance = light.irradiance(&varying.world_pos, &n);
            match light.direction_to_light(&varying.world_pos) {
                Some(l) => {
                    let h = (l + v).try_normalize(1e-9).unwrap_or(n);
                    let n_dot_h = n.dot(&h).max(0.0);
                    let specular = f0 * ((shininess + 2.0) / 8.0 * n_dot_h.powf(shininess));
                    result += irradiance.component_mul(&(diffuse_color + specular));
                }
                None => result += irradiance.component_mul(&diffuse_color),
            }
        }

        // 3. Environment reflection
        if let Some(env_map) = &m.env_map {
            let r = n * (2.0 * n.dot(&v)) - v;
            let n_dot_v = n.dot(&v).clamp(0.0, 1.0);
            let fresnel = f0 + (Vector3::repeat(1.0) - f0) * (1.0 - n_dot_v).powi(5);
            let env = env_map.sample(&r);
            result += env.component_mul(&fresnel) * (1.0 - roughness);
        }

        let color = linear_to_srgb(result);
        Some(Vector4::new(
            color.x.min(1.0),
            color.y.min(1.0),
            color.z.min(1.0),
            self.opacity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varying_facing(normal: Vector3<f32>) -> PhysicalVarying {
        PhysicalVarying {
            normal,
            world_pos: Point3::origin(),
        }
    }

    #[test]
    fn lit_by_ambient_only_gives_scaled_base_color() {
        let lights = [Light::new_ambient(Vector3::new(1.0, 1.0, 1.0), 1.0)];
        let material = PhysicalMaterial {
            metalness: 0.0,
            ..Default::default()
        };
        let shader = PhysicalShader::new(
            Matrix4::identity(),
            Matrix4::identity(),
            Matrix4::identity(),
            Point3::new(0.0, 0.0, 10.0),
            &lights,
            &material,
            1.0,
        );
        let color = shader.fragment(varying_facing(Vector3::z())).unwrap();
        assert!((color.x - 1.0).abs() < 1e-4);
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn no_lights_renders_black_and_zero_opacity_discards() {
        let material = PhysicalMaterial::default();
        let mut shader = PhysicalShader::new(
            Matrix4::identity(),
            Matrix4::identity(),
            Matrix4::identity(),
            Point3::new(0.0, 0.0, 10.0),
            &[],
            &material,
            0.7,
        );
        let color = shader.fragment(varying_facing(Vector3::z())).unwrap();
        assert_eq!(color, Vector4::new(0.0, 0.0, 0.0, 0.7));

        shader.opacity = 0.0;
        assert!(shader.fragment(varying_facing(Vector3::z())).is_none());
    }
}
