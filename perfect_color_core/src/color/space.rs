//! Fixed-parameter color space conversions for the elicitation pipeline.
//!
//! Provides the sRGB ↔ CIELAB transform (CIE 1931 2° observer, D65
//! illuminant) and the HSV → sRGB decomposition used by the picker plane.
//! All functions are total: inputs outside the working domain are clamped or
//! wrapped rather than rejected, so no conversion can fail at runtime.

const D65_WHITE_POINT: [f32; 3] = [0.95047, 1.0, 1.08883];
const EPSILON: f32 = 0.008856; // CIELAB linearity breakpoint
const KAPPA: f32 = 903.3; // slope of the linear L* segment

/// An 8-bit sRGB color, the canonical representation across the session
/// pipeline. HSV and CIELAB are derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// CIELAB coordinates. The working domain is L* ∈ [0, 100] and
/// a*/b* ∈ [-128, 127]; values produced by [`rgb_to_lab`] always lie inside
/// it, synthetic values can be brought back with [`Lab::clamped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Clamp each channel to the working CIELAB domain.
    pub fn clamped(self) -> Self {
        Self {
            l: self.l.clamp(0.0, 100.0),
            a: self.a.clamp(-128.0, 127.0),
            b: self.b.clamp(-128.0, 127.0),
        }
    }

    /// Chroma magnitude `sqrt(a² + b²)`, the saturation proxy used for
    /// session length prediction.
    pub fn chroma(self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

fn srgb_to_linear(channel: f32) -> f32 {
    if channel > 0.04045 {
        ((channel + 0.055) / 1.055).powf(2.4)
    } else {
        channel / 12.92
    }
}

fn linear_to_srgb(channel: f32) -> u8 {
    let encoded = if channel > 0.0031308 {
        1.055 * channel.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * channel
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    let cubed = t * t * t;
    if cubed > EPSILON {
        cubed
    } else {
        (116.0 * t - 16.0) / KAPPA
    }
}

/// Convert an 8-bit sRGB color to CIELAB.
pub fn rgb_to_lab(color: Rgb) -> Lab {
    let r = srgb_to_linear(color.r as f32 / 255.0);
    let g = srgb_to_linear(color.g as f32 / 255.0);
    let b = srgb_to_linear(color.b as f32 / 255.0);

    let x = 0.4124 * r + 0.3576 * g + 0.1805 * b;
    let y = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    let z = 0.0193 * r + 0.1192 * g + 0.9505 * b;

    let fx = lab_f(x / D65_WHITE_POINT[0]);
    let fy = lab_f(y / D65_WHITE_POINT[1]);
    let fz = lab_f(z / D65_WHITE_POINT[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIELAB coordinates back to 8-bit sRGB.
///
/// Out-of-gamut inputs are clamped per channel after gamma encoding, so the
/// result is always a displayable color. Round-tripping a color through
/// [`rgb_to_lab`] and back reproduces it within ±1 per channel.
pub fn lab_to_rgb(lab: Lab) -> Rgb {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = lab.a / 500.0 + fy;
    let fz = fy - lab.b / 200.0;

    let x = lab_f_inv(fx) * D65_WHITE_POINT[0];
    let y = lab_f_inv(fy) * D65_WHITE_POINT[1];
    let z = lab_f_inv(fz) * D65_WHITE_POINT[2];

    let r = 3.2406 * x - 1.5372 * y - 0.4986 * z;
    let g = -0.9689 * x + 1.8758 * y + 0.0415 * z;
    let b = 0.0557 * x - 0.2040 * y + 1.0570 * z;

    Rgb::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

/// Convert HSV (hue in degrees, saturation and value in [0, 1]) to sRGB
/// using the six 60° hue sectors. Hue is wrapped into [0, 360) and the other
/// channels are clamped, so every input maps to a color.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb::new(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// Unweighted Euclidean distance in CIELAB (the CIE76 ΔE).
///
/// The session pipeline deliberately uses this simplified metric everywhere
/// a perceptual distance is needed; candidate tolerances and the refinement
/// threshold are calibrated against it.
#[inline]
pub fn delta_e76(a: Lab, b: Lab) -> f32 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}
