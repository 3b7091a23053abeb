//! Reconstruction / anti-aliasing kernels used for both resampling passes.
//!
//! Each kernel is an even function of the distance `x` (in source samples at
//! unit filter scale) and is zero outside `[-support, support]`. Weights are
//! normalized later, so kernels need not integrate to exactly 1.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Named 1D filter kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Nearest / area average. Support 0.5.
    Box,
    /// Linear interpolation. Support 1.0.
    Tent,
    /// Quadratic bell. Support 1.5.
    Bell,
    /// Cubic B-spline (B=1, C=0), very soft, no ringing. Support 2.0.
    BSpline,
    /// Mitchell-Netravali (B=C=1/3). Support 2.0.
    Mitchell,
    /// Catmull-Rom (B=0, C=0.5), interpolating. Support 2.0.
    CatmullRom,
    /// Gaussian under a Blackman window. Support 1.25.
    Gaussian,
    /// Lanczos with a=3.
    Lanczos3,
    /// Lanczos with a=4.
    #[default]
    Lanczos4,
    /// Lanczos with a=6.
    Lanczos6,
    /// Sinc under an exact Blackman window. Support 3.0.
    Blackman,
}

impl FilterKind {
    /// Half-width of the kernel at unit filter scale.
    pub const fn support(self) -> f32 {
        match self {
            Self::Box => 0.5,
            Self::Tent => 1.0,
            Self::Bell => 1.5,
            Self::BSpline | Self::Mitchell | Self::CatmullRom => 2.0,
            Self::Gaussian => 1.25,
            Self::Lanczos3 | Self::Blackman => 3.0,
            Self::Lanczos4 => 4.0,
            Self::Lanczos6 => 6.0,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Tent => "tent",
            Self::Bell => "bell",
            Self::BSpline => "b-spline",
            Self::Mitchell => "mitchell",
            Self::CatmullRom => "catmull-rom",
            Self::Gaussian => "gaussian",
            Self::Lanczos3 => "lanczos3",
            Self::Lanczos4 => "lanczos4",
            Self::Lanczos6 => "lanczos6",
            Self::Blackman => "blackman",
        }
    }

    /// Whether the kernel has negative lobes and can overshoot at edges.
    pub const fn rings(self) -> bool {
        matches!(
            self,
            Self::Mitchell | Self::CatmullRom | Self::Lanczos3 | Self::Lanczos4 | Self::Lanczos6 | Self::Blackman
        )
    }

    /// Evaluate the kernel at distance `x`.
    #[inline]
    pub fn eval(self, x: f32) -> f32 {
        match self {
            Self::Box => box_filter(x),
            Self::Tent => tent(x),
            Self::Bell => bell(x),
            Self::BSpline => b_spline(x),
            Self::Mitchell => mitchell(x),
            Self::CatmullRom => catmull_rom(x),
            Self::Gaussian => gaussian(x),
            Self::Lanczos3 => lanczos(x, 3.0),
            Self::Lanczos4 => lanczos(x, 4.0),
            Self::Lanczos6 => lanczos(x, 6.0),
            Self::Blackman => blackman(x),
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [FilterKind; 11] = [
            FilterKind::Box,
            FilterKind::Tent,
            FilterKind::Bell,
            FilterKind::BSpline,
            FilterKind::Mitchell,
            FilterKind::CatmullRom,
            FilterKind::Gaussian,
            FilterKind::Lanczos3,
            FilterKind::Lanczos4,
            FilterKind::Lanczos6,
            FilterKind::Blackman,
        ];
        &ALL
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a filter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}`")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "box" | "nearest" | "area" => Ok(Self::Box),
            "tent" | "triangle" | "bilinear" | "linear" => Ok(Self::Tent),
            "bell" => Ok(Self::Bell),
            "b-spline" | "bspline" | "b_spline" => Ok(Self::BSpline),
            "mitchell" => Ok(Self::Mitchell),
            "catmull-rom" | "catmullrom" | "catrom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" => Ok(Self::Lanczos3),
            "lanczos4" | "lanczos" => Ok(Self::Lanczos4),
            "lanczos6" => Ok(Self::Lanczos6),
            "blackman" => Ok(Self::Blackman),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Half-open so that a sample exactly between two pixels is counted once.
#[inline]
fn box_filter(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

#[inline]
fn tent(x: f32) -> f32 {
    let x = x.abs();
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

#[inline]
fn bell(x: f32) -> f32 {
    let x = x.abs();
    if x < 0.5 {
        0.75 - x * x
    } else if x < 1.5 {
        let t = x - 1.5;
        0.5 * t * t
    } else {
        0.0
    }
}

#[inline]
fn b_spline(x: f32) -> f32 {
    let x = x.abs();
    if x < 1.0 {
        let xx = x * x;
        0.5 * xx * x - xx + 2.0 / 3.0
    } else if x < 2.0 {
        let t = 2.0 - x;
        t * t * t / 6.0
    } else {
        0.0
    }
}

/// Mitchell-Netravali with B=C=1/3; overshoot is typically under 1%.
#[inline]
fn mitchell(x: f32) -> f32 {
    let x = x.abs();
    if x >= 2.0 {
        0.0
    } else if x >= 1.0 {
        (-7.0 / 18.0) * x * x * x + 2.0 * x * x - (10.0 / 3.0) * x + 16.0 / 9.0
    } else {
        (7.0 / 6.0) * x * x * x - 2.0 * x * x + 8.0 / 9.0
    }
}

#[inline]
fn catmull_rom(x: f32) -> f32 {
    let x = x.abs();
    if x >= 2.0 {
        0.0
    } else if x >= 1.0 {
        -0.5 * x * x * x + 2.5 * x * x - 4.0 * x + 2.0
    } else {
        1.5 * x * x * x - 2.5 * x * x + 1.0
    }
}

#[inline]
fn sinc(x: f32) -> f32 {
    if x.abs() < 1e-8 {
        1.0
    } else {
        let pi_x = PI * x;
        pi_x.sin() / pi_x
    }
}

#[inline]
fn lanczos(x: f32, a: f32) -> f32 {
    if x.abs() >= a { 0.0 } else { sinc(x) * sinc(x / a) }
}

/// Exact Blackman window over `[-1, 1]`.
#[inline]
fn blackman_window(x: f32) -> f32 {
    0.426_590_7 + 0.496_560_6 * (PI * x).cos() + 0.076_848_67 * (2.0 * PI * x).cos()
}

#[inline]
fn blackman(x: f32) -> f32 {
    const SUPPORT: f32 = 3.0;
    if x.abs() >= SUPPORT { 0.0 } else { sinc(x) * blackman_window(x / SUPPORT) }
}

#[inline]
fn gaussian(x: f32) -> f32 {
    const SUPPORT: f32 = 1.25;
    if x.abs() >= SUPPORT {
        0.0
    } else {
        (-2.0 * x * x).exp() * blackman_window(x / SUPPORT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernels_peak_at_zero_and_vanish_outside_support() {
        for &kind in FilterKind::all() {
            let peak = kind.eval(0.0);
            assert!(peak > 0.0, "{kind} has no weight at 0");
            for step in 1..=20 {
                let x = step as f32 * 0.1;
                assert!(kind.eval(x) <= peak + 1e-6, "{kind} exceeds its peak at {x}");
            }
            let outside = kind.support() + 0.01;
            assert_eq!(kind.eval(outside), 0.0, "{kind} nonzero past support");
            assert_eq!(kind.eval(-outside), 0.0, "{kind} nonzero past -support");
        }
    }

    #[test]
    fn test_kernels_are_even() {
        for &kind in FilterKind::all().iter().filter(|k| **k != FilterKind::Box) {
            for step in 0..30 {
                let x = step as f32 * 0.13;
                assert!((kind.eval(x) - kind.eval(-x)).abs() < 1e-6, "{kind} not even at {x}");
            }
        }
    }

    #[test]
    fn test_interpolating_kernels_vanish_at_integers() {
        for kind in [FilterKind::Lanczos3, FilterKind::Lanczos4, FilterKind::CatmullRom, FilterKind::Tent] {
            assert!((kind.eval(0.0) - 1.0).abs() < 1e-6);
            for n in 1..4 {
                assert!(kind.eval(n as f32).abs() < 1e-6, "{kind} at {n}");
            }
        }
    }

    #[test]
    fn test_box_is_half_open() {
        assert_eq!(FilterKind::Box.eval(-0.5), 1.0);
        assert_eq!(FilterKind::Box.eval(0.5), 0.0);
    }

    #[test]
    fn test_names_roundtrip_through_from_str() {
        for &kind in FilterKind::all() {
            assert_eq!(kind.name().parse::<FilterKind>(), Ok(kind));
        }
        assert_eq!("Lanczos".parse::<FilterKind>(), Ok(FilterKind::Lanczos4));
        assert_eq!("bilinear".parse::<FilterKind>(), Ok(FilterKind::Tent));
        assert!("sharpest".parse::<FilterKind>().is_err());
    }

    #[test]
    fn test_default_filter_is_lanczos4() {
        assert_eq!(FilterKind::default(), FilterKind::Lanczos4);
        assert!(FilterKind::default().rings());
        assert!(!FilterKind::Tent.rings());
    }
}
