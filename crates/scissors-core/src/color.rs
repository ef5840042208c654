//! Packed RGB pixel values.

/// An RGB colour packed into a `u32` (0x00RRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0);
    pub const WHITE: Self = Self(0x00FF_FFFF);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// A neutral grey with all three channels set to `v`.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::from_rgb(v, v, v)
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Perceived brightness, using the Rec. 601 weights in fixed point.
    #[inline]
    pub const fn luma(self) -> u8 {
        let y = 299 * self.r() as u32 + 587 * self.g() as u32 + 114 * self.b() as u32;
        ((y + 500) / 1000) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trip() {
        let c = Color::from_rgb(0xAB, 0xCD, 0xEF);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
    }

    #[test]
    fn luma_of_greys_is_identity() {
        for v in [0u8, 1, 17, 128, 254, 255] {
            assert_eq!(Color::gray(v).luma(), v);
        }
        assert_eq!(Color::WHITE.luma(), 255);
        assert!(Color::from_rgb(0, 255, 0).luma() > Color::from_rgb(255, 0, 0).luma());
    }
}
