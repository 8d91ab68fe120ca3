use std::str::FromStr;

use thiserror::Error;

/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are multiplied by `a`, all channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

/// A color spec that is neither a known name nor a hex literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color spec {spec:?}")]
pub struct ColorParseError {
    pub spec: String,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight RGBA bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from straight alpha components.
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

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or a basic color name.
    ///
    /// Names are matched case-insensitively.
    pub fn parse(spec: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError { spec: spec.to_string() };
        let s = spec.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let rgba: [u8; 4] = match s.to_ascii_lowercase().as_str() {
            "black" => [0, 0, 0, 255],
            "white" => [255, 255, 255, 255],
            "red" => [255, 0, 0, 255],
            "green" => [0, 255, 0, 255],
            "blue" => [0, 0, 255, 255],
            "yellow" => [255, 255, 0, 255],
            "cyan" => [0, 255, 255, 255],
            "magenta" => [255, 0, 255, 255],
            "gray" | "grey" => [128, 128, 128, 255],
            "transparent" => [0, 0, 0, 0],
            _ => return Err(err()),
        };
        Ok(Self::from_srgb_u8(rgba[0], rgba[1], rgba[2], rgba[3]))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let [r, g, b, a] = match hex.len() {
        3 => [nibble(0)?, nibble(1)?, nibble(2)?, 255],
        4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
        6 => [byte(0)?, byte(2)?, byte(4)?, 255],
        8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
        _ => return None,
    };
    Some(Color::from_srgb_u8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Color::parse("Black").unwrap(), Color::from_straight(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::parse("WHITE").unwrap(), Color::from_straight(1.0, 1.0, 1.0, 1.0));
        assert_eq!(Color::parse("grey").unwrap(), Color::parse("gray").unwrap());
    }

    #[test]
    fn short_and_long_hex_agree() {
        assert_eq!(Color::parse("#f0a").unwrap(), Color::parse("#ff00aa").unwrap());
        assert_eq!(Color::parse("#f0a8").unwrap(), Color::parse("#ff00aa88").unwrap());
    }

    #[test]
    fn hex_alpha_is_premultiplied() {
        let c = Color::parse("#ffffff00").unwrap();
        assert_eq!(c, Color::transparent());

        let half = Color::parse("#ff000080").unwrap();
        assert!((half.a - 128.0 / 255.0).abs() < 1e-6);
        assert!((half.r - half.a).abs() < 1e-6);
        assert_eq!(half.g, 0.0);
    }

    #[test]
    fn straight_round_trip() {
        let c = Color::from_straight(0.2, 0.4, 0.6, 0.5);
        let (r, g, b, a) = c.to_straight();
        assert!((r - 0.2).abs() < 1e-6 && (g - 0.4).abs() < 1e-6 && (b - 0.6).abs() < 1e-6);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn rejects_garbage() {
        for spec in ["", "#", "#12", "#12345", "#xyzxyz", "chartreuse", "#ffé"] {
            assert_eq!(
                Color::parse(spec),
                Err(ColorParseError { spec: spec.to_string() }),
                "{spec:?} should not parse"
            );
        }
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(" red ".parse::<Color>().unwrap(), Color::parse("red").unwrap());
    }
}
