/// Hex team colors and the perceived-brightness check used to pick a readable
/// text color on top of them.

/// Brightness below this (0–255 scale) counts as a dark background.
const DARK_BRIGHTNESS: u32 = 128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`; the leading `#` is optional
    /// and alpha is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 | 4 => {
                let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
                Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)? })
            }
            6 | 8 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)? })
            }
            _ => None,
        }
    }

    /// Perceived brightness, 0–255 (ITU-R BT.601 weights).
    pub fn brightness(&self) -> u32 {
        (u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114) / 1000
    }

    pub fn is_dark(&self) -> bool {
        self.brightness() < DARK_BRIGHTNESS
    }
}

/// Whether text on this background should be light. Unparseable colors are
/// treated as black.
pub fn is_dark(raw: &str) -> bool {
    Rgb::parse(raw).unwrap_or_default().is_dark()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::parse("#DDD"), Some(Rgb { r: 0xDD, g: 0xDD, b: 0xDD }));
        assert_eq!(Rgb::parse("0a1B2c"), Some(Rgb { r: 0x0A, g: 0x1B, b: 0x2C }));
        assert_eq!(Rgb::parse("#11223380"), Some(Rgb { r: 0x11, g: 0x22, b: 0x33 }));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Rgb::parse("navy"), None);
        assert_eq!(Rgb::parse("#12"), None);
        assert_eq!(Rgb::parse(""), None);
    }

    #[test]
    fn fallback_bracket_colors_are_light() {
        assert!(!is_dark("#DDD"));
        assert!(!is_dark("#BBB"));
    }

    #[test]
    fn dark_team_colors_are_dark() {
        assert!(is_dark("#000000"));
        assert!(is_dark("#002D62"));
        assert!(!is_dark("#FFC72C"));
    }

    #[test]
    fn brightness_threshold_is_exclusive() {
        // Neutral greys have a brightness equal to their channel value.
        assert!(!Rgb { r: 128, g: 128, b: 128 }.is_dark());
        assert!(Rgb { r: 127, g: 127, b: 127 }.is_dark());
    }

    #[test]
    fn unparseable_color_counts_as_dark() {
        assert!(is_dark("not-a-color"));
    }
}
