use crate::constants::{CONTRAST_SHIFT, DARK_BORDER, DARK_LUMINANCE, LIGHT_BORDER};
use crate::crypto::Digest;
use csscolorparser::Color;
use serde::{Deserialize, Serialize};

// Colour handling for faces: the deterministic base colour from a digest, plus the eye and
// border colours a renderer needs to keep a face readable on any fill.

pub fn color_from_digest(digest: &Digest) -> String {
    let bytes = digest.as_bytes();
    format!("#{:02x}{:02x}{:02x}", bytes[0], bytes[1], bytes[2])
}

/// Accepts any CSS colour, which covers the `#rrggbb` digest colours and the `hsl(..)`
/// rainbow colours.
pub fn parse_color(input: &str) -> Option<Color> {
    csscolorparser::parse(input.trim()).ok()
}

/// Perceived brightness on a 0-255 scale.
pub fn brightness(color: &Color) -> f64 {
    let [r, g, b, _] = color.to_rgba8();
    (r as f64 * 299.0 + g as f64 * 587.0 + b as f64 * 114.0) / 1000.0
}

pub fn is_light(color: &Color) -> bool {
    brightness(color) >= 128.0
}

/// WCAG relative luminance.
pub fn luminance(color: &Color) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    let [r, g, b, _] = color.to_rgba8();
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Shifts HSL lightness by `amount` percentage points, clamped to black and white.
pub fn lighten(color: &Color, amount: f64) -> Color {
    let (h, s, l, a) = color.to_hsla();
    let h = if h.is_nan() { 0.0 } else { h };
    Color::from_hsla(h, s, (l + amount / 100.0).clamp(0.0, 1.0), a)
}

pub fn darken(color: &Color, amount: f64) -> Color {
    lighten(color, -amount)
}

/// Render hints for a face: the fill itself, a contrasting eye colour and a border.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct FaceStyle {
    pub fill: String,
    pub eye: String,
    pub border: String,
}

impl FaceStyle {
    pub fn for_color(color: &str) -> FaceStyle {
        let base = parse_color(color).unwrap_or_else(|| {
            log::debug!("unparseable face colour {:?}, styling as black", color);
            Color::new(0.0, 0.0, 0.0, 1.0)
        });
        let eye = if is_light(&base) {
            darken(&base, CONTRAST_SHIFT)
        } else {
            lighten(&base, CONTRAST_SHIFT)
        };
        let border = if luminance(&base) < DARK_LUMINANCE {
            LIGHT_BORDER
        } else {
            DARK_BORDER
        };
        FaceStyle {
            fill: color.to_string(),
            eye: eye.to_hex_string(),
            border: border.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::derive_digest;
    use rstest::rstest;

    fn is_hex_color(s: &str) -> bool {
        s.len() == 7
            && s.starts_with('#')
            && s[1..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn digest_color_is_first_three_bytes() {
        assert_eq!(color_from_digest(&derive_digest("HELLO")), "#3733cd");
        assert_eq!(color_from_digest(&derive_digest("")), "#e3b0c4");
        let mut bytes = [0u8; 32];
        bytes[2] = 0x0a;
        assert_eq!(color_from_digest(&Digest::from_bytes(bytes)), "#00000a");
    }

    #[test]
    fn digest_colors_are_lowercase_hex() {
        for i in 0..300 {
            let color = color_from_digest(&derive_digest(&format!("payload {}", i)));
            assert!(is_hex_color(&color), "{}", color);
        }
    }

    fn rgb(input: &str) -> Option<[u8; 3]> {
        parse_color(input).map(|c| {
            let [r, g, b, _] = c.to_rgba8();
            [r, g, b]
        })
    }

    #[rstest]
    #[case("#ff0000", Some([255, 0, 0]))]
    #[case("#FFF", Some([255, 255, 255]))]
    #[case(" #3733cd ", Some([0x37, 0x33, 0xcd]))]
    #[case("hsl(120, 100%, 50%)", Some([0, 255, 0]))]
    #[case("hsl(240, 100%, 50%)", Some([0, 0, 255]))]
    #[case("hsl(0, 0%, 50%)", Some([128, 128, 128]))]
    #[case("#12345", None)]
    #[case("hsl(1, 2%)", None)]
    #[case("not a colour", None)]
    fn parses_colors(#[case] input: &str, #[case] expected: Option<[u8; 3]>) {
        assert_eq!(rgb(input), expected);
    }

    #[test]
    fn lighten_and_darken_clamp() {
        let white = parse_color("#ffffff").unwrap();
        let black = parse_color("#000000").unwrap();
        assert_eq!(lighten(&white, 55.0).to_hex_string(), "#ffffff");
        assert_eq!(darken(&black, 55.0).to_hex_string(), "#000000");
        assert_eq!(darken(&white, 100.0).to_hex_string(), "#000000");
        assert_eq!(darken(&parse_color("#ff0000").unwrap(), 50.0).to_hex_string(), "#000000");
    }

    #[test]
    fn brightness_splits_light_from_dark() {
        assert!(is_light(&parse_color("#e0e0e0").unwrap()));
        assert!(!is_light(&parse_color("#3733cd").unwrap()));
        assert!(luminance(&parse_color("#050505").unwrap()) < DARK_LUMINANCE);
    }

    #[test]
    fn style_for_light_fill_has_dark_eyes() {
        let style = FaceStyle::for_color("#e0e0e0");
        assert_eq!(style.eye, "#545454");
        assert_eq!(style.border, DARK_BORDER);
    }

    #[test]
    fn style_for_very_dark_fill_has_light_border() {
        let style = FaceStyle::for_color("#050505");
        assert_eq!(style.border, LIGHT_BORDER);
        assert!(is_light(&parse_color(&style.eye).unwrap()));
    }

    #[test]
    fn style_accepts_rainbow_colors() {
        let style = FaceStyle::for_color("hsl(200, 100%, 50%)");
        assert_eq!(style.fill, "hsl(200, 100%, 50%)");
        assert!(is_hex_color(&style.eye));
    }
}
