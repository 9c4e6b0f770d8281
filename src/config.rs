//! Per-element configuration read from `data-*` attributes.
//!
//! Parsing is deliberately permissive: numbers are read from the longest
//! numeric prefix (`"8px"` is 8) and anything unreadable falls back to the
//! hardcoded default. There is no error path.

use crate::color::Rgb;

/// Marker attribute; any value other than [`DISABLE_SENTINEL`] activates the effect.
pub const MARKER_ATTR: &str = "data-glass";
pub const DISABLE_SENTINEL: &str = "false";

pub const ATTR_COLOR_ONE: &str = "data-color-one";
pub const ATTR_COLOR_TWO: &str = "data-color-two";
pub const ATTR_COLUMNS: &str = "data-columns";
pub const ATTR_DISTORTION: &str = "data-distortion";
pub const ATTR_MODE: &str = "data-glass-mode";

pub const DEFAULT_COLUMNS: i64 = 5;
pub const DEFAULT_DISTORTION: f32 = 0.25;
pub const DEFAULT_COLOR_ONE: Rgb = Rgb([0x74 as f32 / 255.0, 0x1d as f32 / 255.0, 0xe2 as f32 / 255.0]);
pub const DEFAULT_COLOR_TWO: Rgb = Rgb([0x77 as f32 / 255.0, 0xbe as f32 / 255.0, 0xbb as f32 / 255.0]);

/// Additive grain amplitude.
pub const GRAIN_AMOUNT: f32 = 0.04;
/// Elements narrower or shorter than this (CSS px) are skipped.
pub const MIN_SIZE_PX: f64 = 2.0;
/// Trailing-edge resize debounce window.
pub const DEBOUNCE_MS: f64 = 120.0;
pub const MAX_PIXEL_RATIO: f64 = 1.5;

/// Which fragment formulation an instance runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShaderMode {
    /// Fluted glass with drifting blobs and grain.
    #[default]
    Glass,
    /// Opaque four-per-second flash between the two colors, for checking the loop ticks.
    Pulse,
}

impl ShaderMode {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "glass" => Some(Self::Glass),
            "pulse" => Some(Self::Pulse),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Pulse => "pulse",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassConfig {
    pub color_one: Rgb,
    pub color_two: Rgb,
    /// Requested column count; normalized by the lookup builder.
    pub columns: i64,
    pub distortion: f32,
    pub mode: ShaderMode,
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            color_one: DEFAULT_COLOR_ONE,
            color_two: DEFAULT_COLOR_TWO,
            columns: DEFAULT_COLUMNS,
            distortion: DEFAULT_DISTORTION,
            mode: ShaderMode::Glass,
        }
    }
}

impl GlassConfig {
    /// Build a config from an attribute getter such as `Element::get_attribute`.
    pub fn from_attributes<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let distortion = get(ATTR_DISTORTION)
            .as_deref()
            .and_then(parse_float_prefix)
            .map(|v| v as f32)
            .filter(|v| v.is_finite())
            .unwrap_or(defaults.distortion);

        Self {
            color_one: Rgb::parse_or(get(ATTR_COLOR_ONE).as_deref(), defaults.color_one),
            color_two: Rgb::parse_or(get(ATTR_COLOR_TWO).as_deref(), defaults.color_two),
            columns: get(ATTR_COLUMNS)
                .as_deref()
                .and_then(parse_int_prefix)
                .unwrap_or(defaults.columns),
            distortion,
            mode: get(ATTR_MODE)
                .as_deref()
                .and_then(ShaderMode::from_id)
                .unwrap_or(defaults.mode),
        }
    }
}

/// Whether a marker attribute value activates the effect.
pub fn is_enabled(marker: Option<&str>) -> bool {
    matches!(marker, Some(v) if v != DISABLE_SENTINEL)
}

/// Whether a layout box is large enough to host a surface.
pub fn is_renderable(width: f64, height: f64) -> bool {
    width >= MIN_SIZE_PX && height >= MIN_SIZE_PX
}

/// Integer from the leading decimal digits of `s`, after optional whitespace and sign.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (neg, rest) = split_sign(s);
    let digits: &str = &rest[..rest.bytes().take_while(u8::is_ascii_digit).count()];
    if digits.is_empty() {
        return None;
    }
    // Saturate instead of failing on absurdly long inputs.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if neg { -magnitude } else { magnitude })
}

/// Float from the longest numeric prefix of `s` (`"0.3em"` is 0.3, `".5"` is 0.5).
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (neg, rest) = split_sign(s);
    let bytes = rest.as_bytes();

    if rest.starts_with("Infinity") {
        return Some(if neg { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let mut end = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    let mut mantissa_digits = end;
    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        mantissa_digits += frac;
        end += 1 + frac;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value: f64 = rest[..end].parse().ok()?;
    Some(if neg { -value } else { value })
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attrs(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn marker_values() {
        assert!(is_enabled(Some("true")));
        assert!(is_enabled(Some("")));
        assert!(is_enabled(Some("yes")));
        assert!(!is_enabled(Some("false")));
        assert!(!is_enabled(None));
    }

    #[test]
    fn int_prefix_is_permissive() {
        assert_eq!(parse_int_prefix("12"), Some(12));
        assert_eq!(parse_int_prefix("  8px"), Some(8));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("4.9"), Some(4));
        assert_eq!(parse_int_prefix("px8"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn float_prefix_is_permissive() {
        assert_eq!(parse_float_prefix("0.3"), Some(0.3));
        assert_eq!(parse_float_prefix(".5x"), Some(0.5));
        assert_eq!(parse_float_prefix("2."), Some(2.0));
        assert_eq!(parse_float_prefix("1e-1"), Some(0.1));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-0.25rem"), Some(-0.25));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("abc"), None);
    }

    #[test]
    fn defaults_when_attributes_absent() {
        let cfg = GlassConfig::from_attributes(attrs(&[]));
        assert_eq!(cfg, GlassConfig::default());
        assert_eq!(cfg.columns, 5);
        assert_eq!(cfg.distortion, 0.25);
    }

    #[test]
    fn reads_every_attribute() {
        let cfg = GlassConfig::from_attributes(attrs(&[
            (ATTR_COLOR_ONE, "#000"),
            (ATTR_COLOR_TWO, "rgb(255,255,255)"),
            (ATTR_COLUMNS, "12"),
            (ATTR_DISTORTION, "0.5"),
            (ATTR_MODE, "Pulse"),
        ]));
        assert_eq!(cfg.color_one, Rgb([0.0, 0.0, 0.0]));
        assert_eq!(cfg.color_two, Rgb([1.0, 1.0, 1.0]));
        assert_eq!(cfg.columns, 12);
        assert_eq!(cfg.distortion, 0.5);
        assert_eq!(cfg.mode, ShaderMode::Pulse);
    }

    #[test]
    fn malformed_attributes_fall_back() {
        let cfg = GlassConfig::from_attributes(attrs(&[
            (ATTR_COLOR_ONE, "nope"),
            (ATTR_COLUMNS, "many"),
            (ATTR_DISTORTION, "Infinity"),
            (ATTR_MODE, "sparkle"),
        ]));
        assert_eq!(cfg, GlassConfig::default());
    }

    #[test]
    fn named_and_functional_colors_are_honored() {
        let cfg = GlassConfig::from_attributes(attrs(&[
            (ATTR_COLOR_ONE, "red"),
            (ATTR_COLOR_TWO, "rgba(0, 0, 255, 0.5)"),
        ]));
        assert_eq!(cfg.color_one, Rgb([1.0, 0.0, 0.0]));
        assert_eq!(cfg.color_two, Rgb([0.0, 0.0, 1.0]));
    }

    #[test]
    fn renderable_threshold() {
        assert!(is_renderable(2.0, 2.0));
        assert!(!is_renderable(1.9, 300.0));
        assert!(!is_renderable(300.0, 0.0));
    }
}
