/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const DARK:   Self = Self::rgb(0x1d, 0x20, 0x21); // #1d2021
    pub const LIGHT:  Self = Self::rgb(0xeb, 0xdb, 0xb2); // #ebdbb2
    pub const YELLOW: Self = Self::rgb(0xd7, 0x99, 0x21); // #d79921

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };
        // `#abc` is shorthand for `#aabbcc`.
        let nibble = |s: &str| -> Option<u8> { byte(s).map(|n| n * 0x11) };

        match hex.len() {
            6 => Some(Self::rgb(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            3 => Some(Self::rgb(
                nibble(&hex[0..1])?,
                nibble(&hex[1..2])?,
                nibble(&hex[2..3])?,
            )),
            _ => None,
        }
    }

    /// Pixel value for a 24-bit TrueColor visual (`0x00RRGGBB`).
    #[inline]
    pub fn to_pixel(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Color::from_hex("#1d2021"), Some(Color::DARK));
        assert_eq!(Color::from_hex("ebdbb2"), Some(Color::LIGHT));
        assert_eq!(Color::from_hex("#fff"), Some(Color::rgb(0xff, 0xff, 0xff)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn pixel_packs_rgb() {
        assert_eq!(Color::DARK.to_pixel(), 0x1d2021);
        assert_eq!(Color::rgb(1, 2, 3).to_pixel(), 0x010203);
    }
}
