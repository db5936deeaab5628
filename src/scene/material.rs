use crate::scene::texture::CubeTexture;
use nalgebra::Vector3;
use std::sync::Arc;

/// Index of a material in [`Scene::materials`](crate::scene::graph::Scene).
/// Several objects may share one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Defines how an object's surface is shaded.
#[derive(Debug, Clone)]
pub enum Material {
    /// Colors surfaces by their view-space normal; ignores lights and textures.
    Normal(NormalMaterial),
    /// Lit by the scene's lights, optionally reflecting an environment cube map.
    Physical(PhysicalMaterial),
}

impl Material {
    pub fn opacity(&self) -> f32 {
        match self {
            Material::Normal(m) => m.opacity,
            Material::Physical(m) => m.opacity,
        }
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        match self {
            Material::Normal(m) => m.opacity = opacity,
            Material::Physical(m) => m.opacity = opacity,
        }
    }

    pub fn is_transparent(&self) -> bool {
        match self {
            Material::Normal(m) => m.transparent,
            Material::Physical(m) => m.transparent,
        }
    }

    /// Opacity actually applied when drawing: non-transparent materials are opaque.
    pub fn effective_opacity(&self) -> f32 {
        if self.is_transparent() {
            self.opacity().clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Installs an environment map where the material can use one.
    /// Returns false for materials that do not sample textures.
    pub fn set_env_map(&mut self, env_map: Arc<CubeTexture>) -> bool {
        match self {
            Material::Physical(m) => {
                m.env_map = Some(env_map);
                true
            }
            Material::Normal(_) => false,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::Normal(NormalMaterial::default())
    }
}

#[derive(Debug, Clone)]
pub struct NormalMaterial {
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for NormalMaterial {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            transparent: false,
        }
    }
}

/// Parameters for a metallic-roughness surface.
#[derive(Debug, Clone)]
pub struct PhysicalMaterial {
    /// Base color (sRGB).
    pub color: Vector3<f32>,
    /// 0.0 = mirror-smooth, 1.0 = fully rough.
    pub roughness: f32,
    /// 0.0 = dielectric, 1.0 = metal.
    pub metalness: f32,
    /// Strength of the environment reflection for dielectrics, [0, 1].
    pub reflectivity: f32,
    pub opacity: f32,
    pub transparent: bool,
    pub env_map: Option<Arc<CubeTexture>>,
}

impl Default for PhysicalMaterial {
    fn default() -> Self {
        Self {
            color: Vector3::new(1.0, 1.0, 1.0),
            roughness: 0.3,
            metalness: 0.1,
            reflectivity: 0.56,
            opacity: 1.0,
            transparent: true,
            env_map: None,
        }
    }
}
