use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{
    barycentric_coordinates, is_inside_triangle, perspective_correct_barycentric,
};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::{Interpolatable, Shader};
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;

#[derive(PartialEq, Copy, Clone, Debug)]
pub enum CullMode {
    Back,
    Front,
    None,
}

/// Draws clip-space triangles onto a [`FrameBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Frustum planes as (axis, sign): a point is inside when `sign * p[axis] <= p.w`.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),
    (0, -1.0),
    (1, 1.0),
    (1, -1.0),
    (2, 1.0),
    (2, -1.0),
];

type ClipVertex<V> = (Vector4<f32>, V);

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
        }
    }

    /// Clips one triangle against the view frustum (Sutherland–Hodgman in
    /// homogeneous clip space) and fills the resulting convex polygon as a fan.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        // Fast path: fully inside, no clipping needed.
        let fully_inside = clip_coords
            .iter()
            .all(|c| CLIP_PLANES.iter().all(|&(axis, sign)| sign * c[axis] <= c.w));
        if fully_inside {
            self.fill_triangle(framebuffer, shader, clip_coords, varyings);
            return;
        }

        let mut polygon: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(16);
        let mut scratch: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(16);
        polygon.extend(clip_coords.iter().copied().zip(varyings.iter().copied()));

        for &(axis, sign) in &CLIP_PLANES {
            if polygon.is_empty() {
                return;
            }
            clip_against_plane(&polygon, &mut scratch, axis, sign);
            std::mem::swap(&mut polygon, &mut scratch);
        }

        if polygon.len() < 3 {
            return;
        }
        let v0 = polygon[0];
        for pair in polygon[1..].windows(2) {
            self.fill_triangle(
                framebuffer,
                shader,
                &[v0.0, pair[0].0, pair[1].0],
                &[v0.1, pair[0].1, pair[1].1],
            );
        }
    }

    /// Rasterizes a triangle that lies inside the frustum: perspective divide,
    /// viewport transform, culling, then per-pixel depth test, shading and blend.
    fn fill_triangle<S: Shader>(
        &self,
        framebuffer: &FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen = [Point2::origin(); 3];
        let mut ndc_z = [0.0; 3];
        let mut w = [0.0; 3];
        for i in 0..3 {
            if clip_coords[i].w.abs() < 1e-6 {
                return;
            }
            let ndc = apply_perspective_division(&clip_coords[i]);
            w[i] = clip_coords[i].w;
            ndc_z[i] = ndc.z;
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
        }

        // Screen space is y-down, so counter-clockwise (front) faces have negative area.
        let e1 = screen[1] - screen[0];
        let e2 = screen[2] - screen[1];
        let signed_area = e1.x * e2.y - e1.y * e2.x;
        match self.cull_mode {
            CullMode::Back if signed_area >= 0.0 => return,
            CullMode::Front if signed_area <= 0.0 => return,
            _ => {}
        }
        if signed_area.abs() < 1e-9 {
            return;
        }

        let min_x = screen.iter().map(|p| p.x).fold(f32::MAX, f32::min).floor() as i32;
        let min_y = screen.iter().map(|p| p.y).fold(f32::MAX, f32::min).floor() as i32;
        let max_x = screen.iter().map(|p| p.x).fold(f32::MIN, f32::max).ceil() as i32;
        let max_y = screen.iter().map(|p| p.y).fold(f32::MIN, f32::max).ceil() as i32;

        let bw = framebuffer.buffer_width as i32;
        let bh = framebuffer.buffer_height as i32;
        if max_x < 0 || max_y < 0 || min_x >= bw || min_y >= bh {
            return;
        }
        let (start_x, end_x) = (min_x.max(0) as usize, max_x.min(bw - 1) as usize);
        let (start_y, end_y) = (min_y.max(0) as usize, max_y.min(bh - 1) as usize);

        (start_y..=end_y).into_par_iter().for_each(|y| {
            for x in start_x..=end_x {
                let center = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some(bary) = barycentric_coordinates(center, screen[0], screen[1], screen[2])
                else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }
                let Some(weights) = perspective_correct_barycentric(bary, w) else {
                    continue;
                };

                // NDC depth is affine in screen space: screen-space weights.
                let z_ndc = bary.x * ndc_z[0] + bary.y * ndc_z[1] + bary.z * ndc_z[2];
                let depth = z_ndc * 0.5 + 0.5;

                let varying =
                    varyings[0] * weights.x + varyings[1] * weights.y + varyings[2] * weights.z;

                // Fragments are shaded before the depth write so discarded
                // (fully transparent) fragments never occlude anything.
                let Some(color) = shader.fragment(varying) else {
                    continue;
                };
                if framebuffer.depth_test_and_update(x, y, depth) {
                    framebuffer.blend_pixel_safe(x, y, color);
                }
            }
        });
    }
}

/// Clips `input` against one plane into `output` (cleared first).
fn clip_against_plane<V>(
    input: &[ClipVertex<V>],
    output: &mut Vec<ClipVertex<V>>,
    axis: usize,
    sign: f32,
) where
    V: Interpolatable,
{
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    let inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;
    let mut prev = last;
    let mut prev_inside = inside(&prev.0);

    for &curr in input {
        let curr_inside = inside(&curr.0);
        if curr_inside != prev_inside
            && let Some(hit) = intersect(prev, curr, axis, sign)
        {
            output.push(hit);
        }
        if curr_inside {
            output.push(curr);
        }
        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Intersection of segment a→b with the plane `sign * p[axis] = p.w`,
/// interpolating position and varying alike.
#[inline(always)]
fn intersect<V>(a: ClipVertex<V>, b: ClipVertex<V>, axis: usize, sign: f32) -> Option<ClipVertex<V>>
where
    V: Interpolatable,
{
    let da = a.0.w - sign * a.0[axis];
    let db = b.0.w - sign * b.0[axis];
    let denom = da - db;
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = da / denom;
    if !t.is_finite() {
        return None;
    }
    Some((a.0 + (b.0 - a.0) * t, a.1 * (1.0 - t) + b.1 * t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;

    /// Flat color; `alpha == 0` discards.
    struct FlatShader {
        color: Vector4<f32>,
    }

    impl Shader for FlatShader {
        type Varying = f32;

        fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, f32) {
            (vertex.position.to_homogeneous(), 0.0)
        }

        fn fragment(&self, _varying: f32) -> Option<Vector4<f32>> {
            (self.color.w > 0.0).then_some(self.color)
        }
    }

    fn triangle() -> [Vector4<f32>; 3] {
        [
            Vector4::new(-0.9, -0.9, 0.0, 1.0),
            Vector4::new(0.9, -0.9, 0.0, 1.0),
            Vector4::new(0.0, 0.9, 0.0, 1.0),
        ]
    }

    fn draw(fb: &mut FrameBuffer, color: Vector4<f32>) {
        let rasterizer = Rasterizer {
            cull_mode: CullMode::None,
        };
        rasterizer.rasterize_triangle(fb, &FlatShader { color }, &triangle(), &[0.0; 3]);
    }

    #[test]
    fn discarded_fragments_leave_color_and_depth_untouched() {
        let mut fb = FrameBuffer::new(8, 8, 1);
        fb.clear(Vector4::zeros(), f32::INFINITY);
        draw(&mut fb, Vector4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(fb.get_pixel(4, 4), Some(Vector4::zeros()));
        assert_eq!(fb.depth_at(4, 4), Some(f32::INFINITY));
    }

    #[test]
    fn translucent_triangle_blends_over_transparent_clear() {
        let mut fb = FrameBuffer::new(8, 8, 1);
        fb.clear(Vector4::zeros(), f32::INFINITY);
        draw(&mut fb, Vector4::new(0.0, 1.0, 0.0, 0.5));
        let center = fb.get_pixel(4, 4).unwrap();
        assert!((center.y - 0.5).abs() < 1e-6);
        assert!((center.w - 0.5).abs() < 1e-6);
        assert_eq!(fb.get_pixel(0, 0), Some(Vector4::zeros()));
    }
}
