use crate::core::color::to_u8;
use crate::core::framebuffer::FrameBuffer;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::error::{Error, Result};
use crate::pipeline::shaders::normal::NormalShader;
use crate::pipeline::shaders::physical::PhysicalShader;
use crate::scene::camera::Camera;
use crate::scene::graph::Scene;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use image::RgbaImage;
use log::{debug, info, trace};
use nalgebra::{Vector3, Vector4};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Construction parameters for a [`Renderer`].
#[derive(Debug, Clone)]
pub struct RendererOptions {
    /// Logical size in pixels.
    pub width: u32,
    pub height: u32,
    /// Logical-to-drawing-buffer scale.
    pub pixel_ratio: f32,
    /// 2x2 supersampling when enabled.
    pub antialias: bool,
    /// Keep the clear alpha; when false the output is always opaque.
    pub alpha: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            pixel_ratio: 1.6,
            antialias: true,
            alpha: true,
        }
    }
}

/// The high-level renderer that orchestrates the pipeline stages.
///
/// Owns the drawing buffer of one widget. After [`Renderer::dispose`] the
/// storage is released and further renders fail.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    framebuffer: FrameBuffer,
    options: RendererOptions,
    clear_color: Vector3<f32>,
    clear_alpha: f32,
    frames_rendered: u64,
    disposed: bool,
}

impl Renderer {
    pub fn new(options: RendererOptions) -> Result<Self> {
        if options.width == 0 || options.height == 0 {
            return Err(Error::InvalidSize {
                width: options.width,
                height: options.height,
            });
        }
        let mut renderer = Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::empty(),
            options,
            clear_color: Vector3::new(1.0, 1.0, 1.0),
            clear_alpha: 0.0,
            frames_rendered: 0,
            disposed: false,
        };
        renderer.allocate();
        Ok(renderer)
    }

    fn sample_count(&self) -> usize {
        if self.options.antialias { 2 } else { 1 }
    }

    fn allocate(&mut self) {
        let (w, h) = self.drawing_buffer_size();
        self.framebuffer = FrameBuffer::new(w, h, self.sample_count());
        debug!(
            "Renderer buffer {}x{} (logical {}x{}, ratio {}, {}x SSAA)",
            w,
            h,
            self.options.width,
            self.options.height,
            self.options.pixel_ratio,
            self.sample_count()
        );
    }

    /// Logical size.
    pub fn size(&self) -> (u32, u32) {
        (self.options.width, self.options.height)
    }

    /// Size of the output image: logical size times pixel ratio, rounded down.
    pub fn drawing_buffer_size(&self) -> (usize, usize) {
        let ratio = self.options.pixel_ratio.max(f32::EPSILON);
        let w = (self.options.width as f32 * ratio).floor().max(1.0) as usize;
        let h = (self.options.height as f32 * ratio).floor().max(1.0) as usize;
        (w, h)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.options.pixel_ratio
    }

    /// `color` is sRGB; `alpha` is ignored (treated as 1) when the renderer has no alpha.
    pub fn set_clear_color(&mut self, color: Vector3<f32>, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn clear(&mut self) {
        let alpha = if self.options.alpha { self.clear_alpha } else { 1.0 };
        let c = self.clear_color;
        self.framebuffer.clear(Vector4::new(c.x, c.y, c.z, alpha), f32::INFINITY);
    }

    /// Clears and draws every visible object: opaque ones first, then
    /// transparent ones back to front.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<()> {
        if self.disposed {
            return Err(Error::RendererDisposed);
        }
        self.clear();

        let view = camera.view_matrix();
        let projection = camera.projection_matrix();

        // 1. Split into opaque and transparent draws
        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        for object in scene.visible_objects() {
            let Some(material) = scene.material(object.material) else {
                trace!("Object '{}' has no material, skipped", object.name);
                continue;
            };
            if material.is_transparent() {
                let view_z = (view * object.position.push(1.0)).z;
                transparent.push((object, material, view_z));
            } else {
                opaque.push((object, material));
            }
        }

        // 2. Farthest first (most negative view-space z)
        transparent.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

        let draws = opaque
            .into_iter()
            .chain(transparent.into_iter().map(|(o, m, _)| (o, m)));
        for (object, material) in draws {
            let opacity = material.effective_opacity();
            if opacity <= 0.0 {
                continue;
            }
            let model = object.model_matrix();
            match material {
                Material::Normal(_) => {
                    let shader = NormalShader::new(model, view, projection, opacity);
                    self.draw_mesh(object, &shader);
                }
                Material::Physical(physical) => {
                    let shader = PhysicalShader::new(
                        model,
                        view,
                        projection,
                        camera.position,
                        &scene.lights,
                        physical,
                        opacity,
                    );
                    self.draw_mesh(object, &shader);
                }
            }
        }

        self.frames_rendered += 1;
        trace!("Rendered frame {}", self.frames_rendered);
        Ok(())
    }

    /// Draws one object's mesh with the provided shader.
    fn draw_mesh<S: Shader>(&self, object: &SceneObject, shader: &S) {
        let mesh: &Mesh = &object.mesh;

        // 1. Vertex processing, once per vertex
        let processed: Vec<_> = mesh.vertices.par_iter().map(|v| shader.vertex(v)).collect();

        // 2. Primitive assembly and rasterization
        for chunk in mesh.indices.chunks_exact(3) {
            let [Some(a), Some(b), Some(c)] = [chunk[0], chunk[1], chunk[2]].map(|i| processed.get(i as usize))
            else {
                continue;
            };
            self.rasterizer
                .rasterize_triangle(&self.framebuffer, shader, &[a.0, b.0, c.0], &[a.1, b.1, c.1]);
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Resolved drawing buffer as premultiplied RGBA8, row-major from the top.
    /// Empty once disposed.
    pub fn read_pixels(&self) -> Vec<u8> {
        let (w, h) = (self.framebuffer.width, self.framebuffer.height);
        let mut out = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                let px = self.framebuffer.get_pixel(x, y).unwrap_or_else(Vector4::zeros);
                out.extend_from_slice(&[to_u8(px.x), to_u8(px.y), to_u8(px.z), to_u8(px.w)]);
            }
        }
        out
    }

    /// Resolved drawing buffer with straight alpha, for saving to disk.
    pub fn to_image(&self) -> RgbaImage {
        let (w, h) = (self.framebuffer.width as u32, self.framebuffer.height as u32);
        RgbaImage::from_fn(w, h, |x, y| {
            let px = self
                .framebuffer
                .get_pixel(x as usize, y as usize)
                .unwrap_or_else(Vector4::zeros);
            let inv = if px.w > 0.0 { 1.0 / px.w } else { 0.0 };
            image::Rgba([to_u8(px.x * inv), to_u8(px.y * inv), to_u8(px.z * inv), to_u8(px.w)])
        })
    }

    /// Resolved premultiplied RGBA at logical drawing-buffer pixel (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> Option<Vector4<f32>> {
        self.framebuffer.get_pixel(x, y)
    }

    /// Releases the drawing buffer. Idempotent.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.framebuffer = FrameBuffer::empty();
            self.disposed = true;
            info!("Renderer disposed after {} frames", self.frames_rendered);
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
