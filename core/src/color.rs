//! Packed ARGB colors used by paint properties and draw commands.

/// A color stored as `0xAARRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque light gray, used for unselected tracks.
    pub const LIGHT_GRAY: Self = Self(0xFFD9_D9D9);
    /// Opaque blue, used for selected tracks.
    pub const BLUE: Self = Self(0xFF00_7DFF);

    /// Builds a color from individual channels.
    #[must_use]
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            (alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32,
        )
    }

    /// Builds an opaque color from red, green and blue.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_argb(0xFF, red, green, blue)
    }

    /// Alpha channel.
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Returns true when the color is fully transparent.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn channels_pack_as_argb() {
        let color = Color::from_argb(0x80, 0x12, 0x34, 0x56);
        assert_eq!(color.0, 0x8012_3456);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(Color::from_rgb(0, 0, 0), Color::BLACK);
        assert!(Color::TRANSPARENT.is_transparent());
    }
}
