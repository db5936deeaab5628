use crate::animation::Ease;
use crate::core::color::parse_hex;
use crate::error::{Error, Result};
use crate::widget::parallax::Parallax;
use crate::widget::props::{ButtonProps, MaterialKind, WidgetSettings};
use log::debug;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub widget: WidgetConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub texture: TextureConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Deserialize)]
pub struct WidgetConfig {
    #[serde(default = "default_widget_width")]
    pub width: u32,
    #[serde(default = "default_widget_height")]
    pub height: u32,
    #[serde(default = "default_text")]
    pub text: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            width: default_widget_width(),
            height: default_widget_height(),
            text: default_text(),
        }
    }
}

/// `"#rrggbb"` or `[r, g, b]` in [0, 1].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Hex(String),
    Rgb([f32; 3]),
}

impl ColorValue {
    fn resolve(&self, key: &'static str) -> Result<Vector3<f32>> {
        match self {
            ColorValue::Hex(text) => parse_hex(text).ok_or_else(|| Error::ConfigValue {
                key,
                reason: format!("'{text}' is not a #rrggbb color"),
            }),
            ColorValue::Rgb(rgb) => Ok(Vector3::from(*rgb)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f32,
    #[serde(default = "default_true")]
    pub antialias: bool,
    #[serde(default = "default_true")]
    pub alpha: bool,
    #[serde(default = "default_clear_color")]
    pub clear_color: ColorValue,
    #[serde(default)]
    pub clear_alpha: f32,
    #[serde(default)]
    pub material: MaterialKind,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_ratio: default_pixel_ratio(),
            antialias: true,
            alpha: true,
            clear_color: default_clear_color(),
            clear_alpha: 0.0,
            material: MaterialKind::Normal,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_distance")]
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            distance: default_distance(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_follow")]
    pub follow: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            follow: default_follow(),
            damping: default_damping(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    /// Seconds.
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default = "default_ease")]
    pub ease: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            ease: default_ease(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextureConfig {
    #[serde(default = "default_texture_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_faces")]
    pub faces: [String; 6],
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            dir: default_texture_dir(),
            faces: default_faces(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: f32,
    #[serde(default = "default_window_height")]
    pub height: f32,
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_title(),
        }
    }
}

fn default_widget_width() -> u32 {
    400
}
fn default_widget_height() -> u32 {
    300
}
fn default_text() -> String {
    "play".to_string()
}
fn default_pixel_ratio() -> f32 {
    1.6
}
fn default_true() -> bool {
    true
}
fn default_clear_color() -> ColorValue {
    ColorValue::Hex("#ffffff".to_string())
}
fn default_fov() -> f32 {
    70.0
}
fn default_near() -> f32 {
    1.0
}
fn default_far() -> f32 {
    3000.0
}
fn default_distance() -> f32 {
    200.0
}
fn default_follow() -> f32 {
    0.02
}
fn default_damping() -> f32 {
    0.03
}
fn default_duration() -> f32 {
    0.6
}
fn default_ease() -> String {
    "power1.out".to_string()
}
fn default_texture_dir() -> PathBuf {
    PathBuf::from("texture")
}
fn default_faces() -> [String; 6] {
    crate::scene::texture::CUBE_FACE_NAMES.map(String::from)
}
fn default_window_width() -> f32 {
    800.0
}
fn default_window_height() -> f32 {
    600.0
}
fn default_title() -> String {
    "Animated Button".to_string()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn button_props(&self) -> Result<ButtonProps> {
        ButtonProps::new(self.widget.width, self.widget.height, self.widget.text.clone())
    }

    /// Validates the tunables and converts them for the widget.
    pub fn widget_settings(&self) -> Result<WidgetSettings> {
        let ease: Ease = self.animation.ease.parse().map_err(|e| Error::ConfigValue {
            key: "animation.ease",
            reason: format!("{e}"),
        })?;

        positive("render.pixel_ratio", self.render.pixel_ratio)?;
        positive("camera.fov", self.camera.fov)?;
        positive("camera.near", self.camera.near)?;
        if !(self.camera.far > self.camera.near) {
            return Err(Error::ConfigValue {
                key: "camera.far",
                reason: format!("{} must be greater than camera.near", self.camera.far),
            });
        }
        if !(self.animation.duration >= 0.0) {
            return Err(Error::ConfigValue {
                key: "animation.duration",
                reason: format!("{} must be >= 0", self.animation.duration),
            });
        }

        Ok(WidgetSettings {
            pixel_ratio: self.render.pixel_ratio,
            antialias: self.render.antialias,
            alpha: self.render.alpha,
            clear_color: self.render.clear_color.resolve("render.clear_color")?,
            clear_alpha: self.render.clear_alpha.clamp(0.0, 1.0),
            material: self.render.material,
            fov: self.camera.fov,
            near: self.camera.near,
            far: self.camera.far,
            camera_distance: self.camera.distance,
            parallax: Parallax {
                follow: self.parallax.follow,
                damping: self.parallax.damping,
            },
            duration: self.animation.duration,
            ease,
            texture_dir: self.texture.dir.clone(),
            texture_faces: self.texture.faces.clone(),
        })
    }
}

fn positive(key: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::ConfigValue {
            key,
            reason: format!("{value} must be a positive number"),
        })
    }
}
