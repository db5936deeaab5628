use crate::widget::pointer::PointerState;
use nalgebra::Point3;

/// Camera drift toward the pointer, damped each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    /// Fraction of the window size the pointer offsets the camera by.
    pub follow: f32,
    /// Fraction of the current offset pulled back toward zero each frame.
    pub damping: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            follow: 0.02,
            damping: 0.03,
        }
    }
}

impl Parallax {
    /// One frame of camera motion. `window` is the window size in pixels.
    ///
    /// The step is per frame, not per second, so the drift speed follows the
    /// host's frame rate.
    pub fn step(&self, camera: &mut Point3<f32>, pointer: PointerState, window: (f32, f32)) {
        let (w, h) = window;
        camera.x += pointer.x * (w * self.follow) - camera.x * self.damping;
        camera.y += -(pointer.y * (h * self.follow)) - camera.y * self.damping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_where_follow_and_damping_balance() {
        let parallax = Parallax::default();
        let mut camera = Point3::new(0.0, 0.0, 200.0);
        for _ in 0..2000 {
            parallax.step(&mut camera, PointerState::new(0.5, 0.5), (1000.0, 800.0));
        }
        // Fixed point: x = p * w * follow / damping.
        assert!((camera.x - 0.5 * 1000.0 * 0.02 / 0.03).abs() < 1e-2);
        assert!((camera.y + 0.5 * 800.0 * 0.02 / 0.03).abs() < 1e-2);
        assert_eq!(camera.z, 200.0);
    }
}
