use crate::core::color::srgb_to_linear;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A light source in the widget's scene.
#[derive(Debug, Clone)]
pub enum Light {
    /// Uniform light on every surface.
    Ambient { color: Vector3<f32>, intensity: f32 },
    /// A cone of light from `position` toward `target`.
    Spot {
        position: Point3<f32>,
        target: Point3<f32>,
        color: Vector3<f32>,
        intensity: f32,
        /// Range of the light; 0 means no distance falloff.
        distance: f32,
        /// Half-angle of the cone (radians).
        angle: f32,
        /// Fraction of the cone that is attenuated toward the edge, [0, 1].
        penumbra: f32,
        decay: f32,
    },
    /// Sky color from above blending into ground color from below.
    Hemisphere {
        sky_color: Vector3<f32>,
        ground_color: Vector3<f32>,
        intensity: f32,
    },
}

impl Light {
    pub fn new_ambient(color: Vector3<f32>, intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    /// Spot light aimed at the origin with a 60° half-angle and no penumbra.
    pub fn new_spot(position: Point3<f32>, color: Vector3<f32>, intensity: f32, distance: f32) -> Self {
        Self::Spot {
            position,
            target: Point3::origin(),
            color,
            intensity,
            distance,
            angle: PI / 3.0,
            penumbra: 0.0,
            decay: 1.0,
        }
    }

    pub fn new_hemisphere(sky_color: Vector3<f32>, ground_color: Vector3<f32>, intensity: f32) -> Self {
        Self::Hemisphere {
            sky_color,
            ground_color,
            intensity,
        }
    }

    /// Linear-space irradiance arriving at `point` with surface `normal`
    /// (already multiplied by the Lambert term for directional lights).
    pub fn irradiance(&self, point: &Point3<f32>, normal: &Vector3<f32>) -> Vector3<f32> {
        match self {
            Light::Ambient { color, intensity } => srgb_to_linear(*color) * *intensity,

            Light::Hemisphere {
                sky_color,
                ground_color,
                intensity,
            } => {
                let weight = 0.5 * normal.y + 0.5;
                let sky = srgb_to_linear(*sky_color);
                let ground = srgb_to_linear(*ground_color);
                (ground + (sky - ground) * weight) * *intensity
            }

            Light::Spot {
                position,
                target,
                color,
                intensity,
                distance,
                angle,
                penumbra,
                decay,
            } => {
                let to_light = position - point;
                let dist = to_light.norm();
                if dist < 1e-6 {
                    return Vector3::zeros();
                }
                let l = to_light / dist;
                let axis = (target - position).normalize();

                let cos_outer = angle.cos();
                let cos_inner = (angle * (1.0 - penumbra)).cos();
                let cos_theta = (-l).dot(&axis);
                let cone = smoothstep(cos_outer, cos_inner, cos_theta);
                if cone <= 0.0 {
                    return Vector3::zeros();
                }

                let falloff = if *distance > 0.0 {
                    (1.0 - dist / distance).clamp(0.0, 1.0).powf(*decay)
                } else {
                    1.0
                };

                let lambert = normal.dot(&l).max(0.0);
                srgb_to_linear(*color) * *intensity * cone * falloff * lambert
            }
        }
    }

    /// Direction from `point` toward the light, for lights that have one.
    pub fn direction_to_light(&self, point: &Point3<f32>) -> Option<Vector3<f32>> {
        match self {
            Light::Spot { position, .. } => Some((position - point).normalize()),
            Light::Ambient { .. } | Light::Hemisphere { .. } => None,
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if (edge1 - edge0).abs() < 1e-6 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hemisphere_blends_by_normal_y() {
        let light = Light::new_hemisphere(Vector3::new(1.0, 1.0, 1.0), Vector3::zeros(), 1.0);
        let p = Point3::origin();
        let up = light.irradiance(&p, &Vector3::y());
        let down = light.irradiance(&p, &-Vector3::y());
        assert!((up.x - 1.0).abs() < 1e-6);
        assert!(down.x.abs() < 1e-6);
    }

    #[test]
    fn spot_light_is_dark_outside_its_cone() {
        let spot = Light::new_spot(Point3::new(0.0, 100.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 1.0, 0.0);
        // Aimed at the origin: a point below the light is lit, one far to the side is not.
        let lit = spot.irradiance(&Point3::origin(), &Vector3::y());
        let side = spot.irradiance(&Point3::new(1000.0, 100.0, 0.0), &Vector3::x());
        assert!(lit.x > 0.9);
        assert_eq!(side, Vector3::zeros());
    }
}
