/// Premultiplied RGBA color with channels in `[0, 1]`.
///
/// Invariant: `r`, `g` and `b` never exceed `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// From straight-alpha bytes, as theme files write them (`#rrggbbaa`).
    #[inline]
    pub fn from_srgb_u8(rgba: [u8; 4]) -> Self {
        let [r, g, b, a] = rgba.map(|c| c as f32 / 255.0);
        Self::from_straight(r, g, b, a)
    }

    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Same color with its alpha (and premultiplied rgb) scaled by `k`.
    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        let k = k.clamp(0.0, 1.0);
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    /// Source-over composite of `self` onto a premultiplied `dst` pixel.
    #[inline]
    pub fn over(self, dst: [u8; 4]) -> [u8; 4] {
        let inv = 1.0 - self.a;
        let mix = |s: f32, d: u8| {
            let v = s * 255.0 + d as f32 * inv;
            v.round().clamp(0.0, 255.0) as u8
        };
        [mix(self.r, dst[0]), mix(self.g, dst[1]), mix(self.b, dst[2]), mix(self.a, dst[3])]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color { r: self.r as f64, g: self.g as f64, b: self.b as f64, a: self.a as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_premultiplied() {
        let c = Color::from_srgb_u8([255, 0, 0, 128]);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((c.r - c.a).abs() < 1e-6);
        assert_eq!(c.g, 0.0);
    }

    #[test]
    fn opaque_over_replaces() {
        let white = Color::from_srgb_u8([255, 255, 255, 255]);
        assert_eq!(white.over([10, 20, 30, 40]), [255, 255, 255, 255]);
    }

    #[test]
    fn transparent_over_keeps_destination() {
        assert_eq!(Color::transparent().over([10, 20, 30, 40]), [10, 20, 30, 40]);
    }

    #[test]
    fn half_coverage_blends() {
        let white = Color::from_srgb_u8([255, 255, 255, 255]).scaled(0.5);
        assert_eq!(white.over([0, 0, 0, 255]), [128, 128, 128, 255]);
    }
}
