use crate::animation::Ease;
use crate::core::color::from_hex;
use crate::error::{Error, Result};
use crate::scene::texture::CUBE_FACE_NAMES;
use crate::widget::parallax::Parallax;
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::PathBuf;

/// Display parameters of one widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonProps {
    width: u32,
    height: u32,
    text: String,
}

impl ButtonProps {
    pub fn new(width: u32, height: u32, text: impl Into<String>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            text: text.into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Surface shading used by the three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Normal-mapped colors, no lighting.
    #[default]
    Normal,
    /// Lit metallic-roughness surface reflecting the cube texture.
    Physical,
}

/// Tunables shared by every widget a host mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSettings {
    pub pixel_ratio: f32,
    pub antialias: bool,
    pub alpha: bool,
    /// sRGB.
    pub clear_color: Vector3<f32>,
    pub clear_alpha: f32,
    pub material: MaterialKind,

    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera distance along +Z.
    pub camera_distance: f32,
    pub parallax: Parallax,

    /// Seconds.
    pub duration: f32,
    pub ease: Ease,

    pub texture_dir: PathBuf,
    pub texture_faces: [String; 6],
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.6,
            antialias: true,
            alpha: true,
            clear_color: from_hex(0xffffff),
            clear_alpha: 0.0,
            material: MaterialKind::Normal,
            fov: 70.0,
            near: 1.0,
            far: 3000.0,
            camera_distance: 200.0,
            parallax: Parallax::default(),
            duration: 0.6,
            ease: Ease::default(),
            texture_dir: PathBuf::from("texture"),
            texture_faces: CUBE_FACE_NAMES.map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_area() {
        assert!(matches!(
            ButtonProps::new(0, 300, "play"),
            Err(Error::InvalidSize { width: 0, height: 300 })
        ));
        let props = ButtonProps::new(400, 300, "play").unwrap();
        assert_eq!((props.width(), props.height(), props.text()), (400, 300, "play"));
    }
}
