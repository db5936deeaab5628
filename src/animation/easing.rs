use std::f32::consts::FRAC_PI_2;
use std::str::FromStr;

/// Easing curve mapping linear progress in [0, 1] to eased progress.
///
/// `Power*(n)` follows the GSAP power family: `n = 1` is quadratic,
/// `n = 2` cubic, and so on. `Power*(0)` is linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    PowerIn(u8),
    PowerOut(u8),
    PowerInOut(u8),
    SineIn,
    SineOut,
    SineInOut,
}

impl Default for Ease {
    /// `power1.out`, the tween library default.
    fn default() -> Self {
        Ease::PowerOut(1)
    }
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::PowerIn(n) => t.powi(n as i32 + 1),
            Ease::PowerOut(n) => 1.0 - (1.0 - t).powi(n as i32 + 1),
            Ease::PowerInOut(n) => {
                let exp = n as i32 + 1;
                if t < 0.5 {
                    (2.0 * t).powi(exp) / 2.0
                } else {
                    1.0 - (2.0 * (1.0 - t)).powi(exp) / 2.0
                }
            }
            Ease::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Ease::SineOut => (t * FRAC_PI_2).sin(),
            Ease::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ease '{0}'")]
pub struct UnknownEase(pub String);

impl FromStr for Ease {
    type Err = UnknownEase;

    /// Accepts GSAP names such as `none`, `power2.inOut`, `sine.out`, `quad.in`.
    /// A family without a direction defaults to `.out`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lower = name.trim().to_ascii_lowercase();
        let (family, direction) = lower.split_once('.').unwrap_or((lower.as_str(), "out"));

        let power = match family {
            "none" | "linear" | "power0" => return Ok(Ease::Linear),
            "sine" => {
                return match direction {
                    "in" => Ok(Ease::SineIn),
                    "out" => Ok(Ease::SineOut),
                    "inout" => Ok(Ease::SineInOut),
                    _ => Err(UnknownEase(name.to_string())),
                };
            }
            "power1" | "quad" => 1,
            "power2" | "cubic" => 2,
            "power3" | "quart" => 3,
            "power4" | "quint" | "strong" => 4,
            _ => return Err(UnknownEase(name.to_string())),
        };

        match direction {
            "in" => Ok(Ease::PowerIn(power)),
            "out" => Ok(Ease::PowerOut(power)),
            "inout" => Ok(Ease::PowerInOut(power)),
            _ => Err(UnknownEase(name.to_string())),
        }
    }
}
