use crate::core::color::srgb_to_linear;
use crate::error::{Error, Result};
use image::RgbImage;
use log::{debug, info};
use nalgebra::Vector3;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Face order of a cube map: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACE_NAMES: [&str; 6] = ["px.jpg", "nx.jpg", "py.jpg", "ny.jpg", "pz.jpg", "nz.jpg"];

/// Represents a 2D texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)
            .map_err(|source| Error::Texture {
                path: path_ref.to_path_buf(),
                source,
            })?
            .to_rgb8();

        let (width, height) = img.dimensions();
        debug!("Loaded texture: {:?} ({}x{})", path_ref, width, height);

        Ok(Self {
            image: img,
            width,
            height,
        })
    }

    pub fn from_image(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }

    /// Bilinear sample with clamp-to-edge; `u`, `v` in [0, 1], v = 0 at the top row.
    /// Returns linear RGB.
    pub fn sample_clamped(&self, u: f32, v: f32) -> Vector3<f32> {
        if self.width == 0 || self.height == 0 {
            return Vector3::zeros();
        }
        let x = (u.clamp(0.0, 1.0) * self.width as f32 - 0.5).max(0.0);
        let y = (v.clamp(0.0, 1.0) * self.height as f32 - 0.5).max(0.0);

        let x0 = (x.floor() as u32).min(self.width - 1);
        let y0 = (y.floor() as u32).min(self.height - 1);
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let wx = x - x.floor();
        let wy = y - y.floor();

        let top = self.texel(x0, y0) * (1.0 - wx) + self.texel(x1, y0) * wx;
        let bottom = self.texel(x0, y1) * (1.0 - wx) + self.texel(x1, y1) * wx;
        let color = top * (1.0 - wy) + bottom * wy;

        srgb_to_linear(color)
    }

    fn texel(&self, x: u32, y: u32) -> Vector3<f32> {
        let p = self.image.get_pixel(x, y);
        Vector3::new(p[0] as f32 / 255.0, p[1] as f32 / 255.0, p[2] as f32 / 255.0)
    }
}

/// Six square faces forming an environment map.
#[derive(Debug, Clone)]
pub struct CubeTexture {
    /// +X, -X, +Y, -Y, +Z, -Z.
    pub faces: [Texture; 6],
}

impl CubeTexture {
    /// Samples the cube in world direction `dir` (need not be normalized).
    pub fn sample(&self, dir: &Vector3<f32>) -> Vector3<f32> {
        let (ax, ay, az) = (dir.x.abs(), dir.y.abs(), dir.z.abs());

        // (face, sc, tc, major axis magnitude), as in the usual cube map layout.
        let (face, sc, tc, ma) = if ax >= ay && ax >= az {
            if dir.x > 0.0 {
                (0, -dir.z, -dir.y, ax)
            } else {
                (1, dir.z, -dir.y, ax)
            }
        } else if ay >= az {
            if dir.y > 0.0 {
                (2, dir.x, dir.z, ay)
            } else {
                (3, dir.x, -dir.z, ay)
            }
        } else if dir.z > 0.0 {
            (4, dir.x, -dir.y, az)
        } else {
            (5, -dir.x, -dir.y, az)
        };

        if ma < 1e-9 {
            return Vector3::zeros();
        }
        let u = (sc / ma + 1.0) * 0.5;
        let v = (tc / ma + 1.0) * 0.5;
        self.faces[face].sample_clamped(u, v)
    }
}

/// Loads cube maps from a directory, either blocking or in the background.
#[derive(Debug, Clone)]
pub struct CubeTextureLoader {
    dir: PathBuf,
}

impl CubeTextureLoader {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Loads all six faces. Fails on the first missing face, or when the faces
    /// are not squares of one common size.
    pub fn load_blocking(&self, names: &[String; 6]) -> Result<CubeTexture> {
        let [px, nx, py, ny, pz, nz] = names.each_ref().map(|name| Texture::load(self.dir.join(name)));
        let faces = [px?, nx?, py?, ny?, pz?, nz?];

        let size = faces[0].width;
        for (face, name) in faces.iter().zip(names) {
            if face.width != face.height || face.width != size {
                return Err(Error::CubeFaceSize {
                    path: self.dir.join(name),
                    width: face.width,
                    height: face.height,
                });
            }
        }

        info!("Loaded cube texture from {:?} ({}px faces)", self.dir, size);
        Ok(CubeTexture { faces })
    }

    /// Starts loading on a dedicated thread, off the rayon pool the rasterizer
    /// renders on. The result is delivered through the returned handle;
    /// dropping the handle discards it.
    pub fn load(&self, faces: [String; 6]) -> PendingCubeTexture {
        let (sender, receiver) = mpsc::channel();
        let loader = self.clone();
        thread::spawn(move || {
            // The receiver may be gone if the owner was torn down meanwhile.
            let _ = sender.send(loader.load_blocking(&faces));
        });
        PendingCubeTexture {
            receiver: Some(receiver),
        }
    }
}

/// A cube texture that is still loading.
#[derive(Debug)]
pub struct PendingCubeTexture {
    receiver: Option<Receiver<Result<CubeTexture>>>,
}

impl PendingCubeTexture {
    /// Non-blocking check. Yields the result exactly once.
    pub fn poll(&mut self) -> Option<Result<CubeTexture>> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Blocks until the load finishes.
    pub fn wait(mut self) -> Option<Result<CubeTexture>> {
        self.receiver.take()?.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces() -> [String; 6] {
        CUBE_FACE_NAMES.map(String::from)
    }

    fn solid_face(color: [u8; 3]) -> Texture {
        Texture::from_image(RgbImage::from_pixel(4, 4, image::Rgb(color)))
    }

    #[test]
    fn missing_directory_fails_without_panicking() {
        let loader = CubeTextureLoader::new("definitely/not/here");
        let err = loader.load_blocking(&faces()).unwrap_err();
        assert!(matches!(err, Error::Texture { .. }));
    }

    #[test]
    fn background_load_reports_failure_through_handle() {
        let pending = CubeTextureLoader::new("definitely/not/here").load(faces());
        assert!(matches!(pending.wait(), Some(Err(Error::Texture { .. }))));
    }

    #[test]
    fn loads_six_faces_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        for name in CUBE_FACE_NAMES {
            RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 10]))
                .save(dir.path().join(name))
                .unwrap();
        }
        let cube = CubeTextureLoader::new(dir.path()).load_blocking(&faces()).unwrap();
        assert_eq!(cube.faces[5].width, 8);
    }

    #[test]
    fn direction_selects_major_axis_face() {
        let cube = CubeTexture {
            faces: [
                solid_face([255, 0, 0]),
                solid_face([0, 255, 0]),
                solid_face([0, 0, 255]),
                solid_face([255, 255, 0]),
                solid_face([0, 255, 255]),
                solid_face([255, 0, 255]),
            ],
        };
        assert!(cube.sample(&Vector3::new(1.0, 0.1, 0.1)).x > 0.99);
        assert!(cube.sample(&Vector3::new(-1.0, 0.1, 0.1)).y > 0.99);
        assert!(cube.sample(&Vector3::new(0.0, 1.0, 0.2)).z > 0.99);
        let nz = cube.sample(&Vector3::new(0.0, 0.0, -1.0));
        assert!(nz.x > 0.99 && nz.y < 0.01);
    }

    #[test]
    fn empty_texture_samples_black() {
        let empty = Texture::from_image(RgbImage::new(0, 0));
        assert_eq!(empty.sample_clamped(0.5, 0.5), Vector3::zeros());
    }

    #[test]
    fn background_load_finishes_while_rayon_pool_is_busy() {
        let dir = tempfile::tempdir().unwrap();
        for name in CUBE_FACE_NAMES {
            RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]))
                .save(dir.path().join(name))
                .unwrap();
        }

        // Park every rayon worker until the load has been observed.
        let (release, parked) = mpsc::channel::<()>();
        let parked = std::sync::Arc::new(std::sync::Mutex::new(parked));
        for _ in 0..rayon::current_num_threads() {
            let parked = parked.clone();
            rayon::spawn(move || {
                let _ = parked.lock().map(|rx| rx.recv());
            });
        }

        let mut pending = CubeTextureLoader::new(dir.path()).load(faces());
        let start = std::time::Instant::now();
        let mut result = None;
        while result.is_none() && start.elapsed() < std::time::Duration::from_secs(10) {
            result = pending.poll();
            thread::sleep(std::time::Duration::from_millis(5));
        }
        drop(release);

        assert!(matches!(result, Some(Ok(cube)) if cube.faces[0].width == 4));
    }
}
