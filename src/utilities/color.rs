// src/utilities/color.rs
//
// CSS-style color strings from the scene file, resolved once into nannou colors.

use crate::error::{FlowError, Result};
use nannou::color::{rgba, Rgba};

/// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and a few names.
pub fn parse_color(input: &str) -> Result<Rgba> {
    let trimmed = input.trim();
    parse_named(trimmed)
        .or_else(|| parse_hex(trimmed))
        .or_else(|| parse_functional(trimmed))
        .ok_or_else(|| FlowError::InvalidColor(input.to_string()))
}

/// An opaque color from 0-255 channels.
pub fn from_rgb_triple([r, g, b]: [u8; 3]) -> Rgba {
    rgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    )
}

pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    rgba(color.red, color.green, color.blue, alpha)
}

fn parse_named(input: &str) -> Option<Rgba> {
    let color = match input.to_ascii_lowercase().as_str() {
        "white" => rgba(1.0, 1.0, 1.0, 1.0),
        "black" => rgba(0.0, 0.0, 0.0, 1.0),
        "red" => rgba(1.0, 0.0, 0.0, 1.0),
        "green" => rgba(0.0, 128.0 / 255.0, 0.0, 1.0),
        "blue" => rgba(0.0, 0.0, 1.0, 1.0),
        "transparent" => rgba(0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(color)
}

fn parse_hex(input: &str) -> Option<Rgba> {
    let re = regex::Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").ok()?;
    let digits = re.captures(input)?.get(1)?.as_str();

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    let [r, g, b] = if digits.len() == 3 {
        // #abc is shorthand for #aabbcc
        let mut channels = [0u8; 3];
        for (i, c) in digits.chars().enumerate() {
            channels[i] = channel(&format!("{c}{c}"))?;
        }
        channels
    } else {
        [
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]
    };
    Some(from_rgb_triple([r, g, b]))
}

fn parse_functional(input: &str) -> Option<Rgba> {
    let re = regex::Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([\d.]+)\s*)?\)$",
    )
    .ok()?;
    let caps = re.captures(input)?;

    let channel = |i: usize| -> Option<u8> { caps.get(i)?.as_str().parse::<u8>().ok() };
    let color = from_rgb_triple([channel(1)?, channel(2)?, channel(3)?]);

    match caps.get(4) {
        Some(alpha) => {
            let alpha: f32 = alpha.as_str().parse().ok()?;
            Some(with_alpha(color, alpha.clamp(0.0, 1.0)))
        }
        None => Some(color),
    }
}
