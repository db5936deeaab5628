use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector3};
use std::f32::consts::{PI, TAU};

/// A collection of vertices and indices representing a 3D object.
/// Triangles are counter-clockwise when seen from outside.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// 3 indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// UV sphere centered at the origin.
    ///
    /// Produces `(width_segments + 1) * (height_segments + 1)` vertices; the
    /// pole rows emit a single triangle per quad.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let theta = iy as f32 / hs as f32 * PI;
            for ix in 0..=ws {
                let phi = ix as f32 / ws as f32 * TAU;
                let position = Point3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                );
                let normal = position.coords.try_normalize(1e-9).unwrap_or_else(Vector3::y);
                vertices.push(Vertex::new(position, normal));
            }
        }

        let row = ws + 1;
        let mut indices = Vec::new();
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Torus in the XY plane around the Z axis.
    ///
    /// `radius` is the distance from the center to the middle of the tube,
    /// `tube` the tube radius.
    pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let rs = radial_segments.max(3);
        let ts = tubular_segments.max(3);

        let mut vertices = Vec::with_capacity(((rs + 1) * (ts + 1)) as usize);
        for j in 0..=rs {
            let v = j as f32 / rs as f32 * TAU;
            for i in 0..=ts {
                let u = i as f32 / ts as f32 * TAU;
                let ring = radius + tube * v.cos();
                let position = Point3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
                let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
                let normal = (position - center).normalize();
                vertices.push(Vertex::new(position, normal));
            }
        }

        let row = ts + 1;
        let mut indices = Vec::with_capacity((rs * ts * 6) as usize);
        for j in 1..=rs {
            for i in 1..=ts {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self::new(vertices, indices)
    }

    /// Closed cone with its apex on +Y, centered on its half height.
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        let rs = radial_segments.max(3);
        let half = height / 2.0;
        // Slope of the side normals: radius grows by `radius` over `height`.
        let slope = radius / height;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side: an apex row (radius 0) and a base row.
        for (r, y) in [(0.0, half), (radius, -half)] {
            for x in 0..=rs {
                let theta = x as f32 / rs as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = Point3::new(r * sin, y, r * cos);
                let normal = Vector3::new(sin, slope, cos).normalize();
                vertices.push(Vertex::new(position, normal));
            }
        }
        let stride = rs + 1;
        for x in 0..rs {
            let b = stride + x;
            let c = stride + x + 1;
            let d = x + 1;
            indices.extend_from_slice(&[b, c, d]);
        }

        // Base cap facing -Y: one center vertex per segment, then the rim.
        let center_start = vertices.len() as u32;
        for _ in 0..rs {
            vertices.push(Vertex::new(Point3::new(0.0, -half, 0.0), -Vector3::y()));
        }
        let rim_start = vertices.len() as u32;
        for x in 0..=rs {
            let theta = x as f32 / rs as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            vertices.push(Vertex::new(
                Point3::new(radius * sin, -half, radius * cos),
                -Vector3::y(),
            ));
        }
        for x in 0..rs {
            let c = center_start + x;
            let i = rim_start + x;
            indices.extend_from_slice(&[i + 1, i, c]);
        }

        Self::new(vertices, indices)
    }

    /// Largest distance of any vertex from the local origin.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.position.coords.norm())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_counts_match_segment_grid() {
        let sphere = Mesh::sphere(24.0, 32, 32);
        assert_eq!(sphere.vertices.len(), 33 * 33);
        assert_eq!(sphere.triangle_count(), 32 * 31 * 2);
        assert!((sphere.bounding_radius() - 24.0).abs() < 1e-3);
    }

    #[test]
    fn torus_counts_and_extent() {
        let torus = Mesh::torus(16.0, 8.0, 16, 100);
        assert_eq!(torus.vertices.len(), 17 * 101);
        assert_eq!(torus.triangle_count(), 16 * 100 * 2);
        assert!((torus.bounding_radius() - 24.0).abs() < 1e-3);
    }

    #[test]
    fn cone_is_closed_with_side_and_cap() {
        let cone = Mesh::cone(8.0, 16.0, 32);
        assert_eq!(cone.triangle_count(), 64);
        let (min_y, max_y) = cone
            .vertices
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), v| {
                (lo.min(v.position.y), hi.max(v.position.y))
            });
        assert_eq!((min_y, max_y), (-8.0, 8.0));
        assert!(cone.indices.iter().all(|&i| (i as usize) < cone.vertices.len()));
    }

    #[test]
    fn sphere_faces_wind_outward() {
        let sphere = Mesh::sphere(1.0, 8, 6);
        for tri in sphere.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| sphere.vertices[i as usize].position);
            let face_normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(face_normal.dot(&centroid) > 0.0);
        }
    }
}
