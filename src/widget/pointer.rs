/// Pointer position normalized to the window: x and y in [-1, 1], +y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Maps client coordinates (pixels, origin top-left) into the normalized
    /// range. `None` when the window has no area.
    pub fn from_client(client_x: f32, client_y: f32, window_width: f32, window_height: f32) -> Option<Self> {
        if !(window_width > 0.0 && window_height > 0.0) {
            return None;
        }
        Some(Self {
            x: client_x / window_width * 2.0 - 1.0,
            y: -(client_y / window_height) * 2.0 + 1.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center_map_to_unit_square() {
        assert_eq!(PointerState::from_client(0.0, 0.0, 800.0, 600.0), Some(PointerState::new(-1.0, 1.0)));
        assert_eq!(PointerState::from_client(800.0, 600.0, 800.0, 600.0), Some(PointerState::new(1.0, -1.0)));
        assert_eq!(PointerState::from_client(400.0, 300.0, 800.0, 600.0), Some(PointerState::new(0.0, 0.0)));
        assert_eq!(PointerState::from_client(1.0, 1.0, 0.0, 600.0), None);
    }
}
