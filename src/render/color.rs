use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 24-bit colour used by the visual encodings
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

    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const INK: Rgb = Rgb::new(0x11, 0x18, 0x27);

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Parse `value`, falling back to `default` when it is not a colour
    pub fn parse_or(value: Option<&str>, default: Rgb) -> Rgb {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepts `#rgb`, `#rrggbb` and `rgb(r, g, b)`
impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(format!("Invalid hex colour: {s}"));
            }
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(format!("Invalid hex colour: {s}")),
            };
            let channel = |i: usize| {
                u8::from_str_radix(&expanded[i..i + 2], 16)
                    .map_err(|_| format!("Invalid hex colour: {s}"))
            };
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(inner) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            let parts: Vec<u8> = inner
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<_, _>>()
                .map_err(|_| format!("Invalid rgb colour: {s}"))?;
            if let [r, g, b] = parts[..] {
                return Ok(Rgb::new(r, g, b));
            }
        }

        Err(format!("Unknown colour: {s}"))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(rgb: Rgb) -> Self {
        ratatui::style::Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}
