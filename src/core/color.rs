use nalgebra::Vector3;

/// Converts a packed `0xRRGGBB` value into [0, 1] RGB components.
///
/// Components are returned as authored (sRGB), matching how colors are written
/// in the widget's configuration.
pub fn from_hex(hex: u32) -> Vector3<f32> {
    Vector3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

/// Parses `"#rrggbb"`, `"0xrrggbb"` or `"rrggbb"`.
pub fn parse_hex(text: &str) -> Option<Vector3<f32>> {
    let digits = text
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(from_hex)
}

/// sRGB to linear (approximate gamma 2.2), applied before lighting math.
pub fn srgb_to_linear(color: Vector3<f32>) -> Vector3<f32> {
    Vector3::new(color.x.powf(2.2), color.y.powf(2.2), color.z.powf(2.2))
}

/// Converts linear RGB to sRGB (Gamma Correction).
pub fn linear_to_srgb(color: Vector3<f32>) -> Vector3<f32> {
    let gamma = 1.0 / 2.2;
    Vector3::new(
        color.x.max(0.0).powf(gamma),
        color.y.max(0.0).powf(gamma),
        color.z.max(0.0).powf(gamma),
    )
}

/// Quantizes a [0, 1] channel to 8 bits.
#[inline]
pub fn to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
