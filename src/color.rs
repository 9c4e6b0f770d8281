//! CSS color parsing for the two blend colors.
//!
//! Accepts hex (`#rgb`, `#rrggbb`), the CSS named colors, and the functional
//! forms `rgb()`, `rgba()`, `hsl()` and `hsla()` in both comma and space
//! syntax. Channels may be numbers or percentages; alpha is read and dropped.
//! Values are normalized to `0.0..=1.0` and passed to the shader as authored,
//! with no sRGB-to-linear conversion.

/// Normalized RGB triple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0])
    }

    fn from_hex_u32(v: u32) -> Self {
        Self::from_u8((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    /// Parse a CSS color, returning `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some((name, body)) = lower
            .strip_suffix(')')
            .and_then(|rest| rest.split_once('('))
        {
            let args = split_args(body)?;
            return match name.trim() {
                "rgb" | "rgba" => parse_rgb_args(&args),
                "hsl" | "hsla" => parse_hsl_args(&args),
                _ => None,
            };
        }
        named(&lower)
    }

    /// Parse `input`, or return `fallback` when absent or malformed.
    pub fn parse_or(input: Option<&str>, fallback: Rgb) -> Self {
        input.and_then(Self::parse).unwrap_or(fallback)
    }

    /// GLSL `mix`; exact at `t == 0.0` and `t == 1.0`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Rgb([
            mix(self.0[0], other.0[0]),
            mix(self.0[1], other.0[1]),
            mix(self.0[2], other.0[2]),
        ])
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                let v = ch.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Rgb::from_u8(out[0], out[1], out[2]))
        }
        6 => u32::from_str_radix(hex, 16).ok().map(Rgb::from_hex_u32),
        _ => None,
    }
}

/// Three color components, with an optional fourth (alpha) accepted and ignored.
///
/// Handles `a, b, c[, d]` and `a b c[ / d]`.
fn split_args(body: &str) -> Option<[&str; 3]> {
    let parts: Vec<&str> = if body.contains(',') {
        body.split(',').map(str::trim).collect()
    } else {
        let (color, alpha) = match body.split_once('/') {
            Some((color, alpha)) => (color, Some(alpha.trim())),
            None => (body, None),
        };
        let mut parts: Vec<&str> = color.split_whitespace().collect();
        if let Some(alpha) = alpha {
            if parts.len() != 3 {
                return None;
            }
            parts.push(alpha);
        }
        parts
    };
    match parts.as_slice() {
        [a, b, c] => Some([*a, *b, *c]),
        [a, b, c, alpha] if number(alpha).is_some() => Some([*a, *b, *c]),
        _ => None,
    }
}

/// A plain number or a percentage; percentages come back as a fraction.
enum Component {
    Number(f32),
    Percent(f32),
}

fn component(s: &str) -> Option<Component> {
    match s.strip_suffix('%') {
        Some(pct) => number(pct).map(|v| Component::Percent(v / 100.0)),
        None => number(s).map(Component::Number),
    }
}

fn number(s: &str) -> Option<f32> {
    let s = s.strip_suffix('%').unwrap_or(s);
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_rgb_args(args: &[&str; 3]) -> Option<Rgb> {
    let mut out = [0.0f32; 3];
    for (slot, arg) in out.iter_mut().zip(args) {
        let v = match component(arg)? {
            Component::Number(n) => n / 255.0,
            Component::Percent(p) => p,
        };
        *slot = v.clamp(0.0, 1.0);
    }
    Some(Rgb(out))
}

fn parse_hsl_args(args: &[&str; 3]) -> Option<Rgb> {
    let hue = args[0].strip_suffix("deg").unwrap_or(args[0]);
    let h = number(hue)?.rem_euclid(360.0) / 360.0;
    let fraction = |arg: &str| -> Option<f32> {
        let v = match component(arg)? {
            Component::Percent(p) => p,
            Component::Number(n) => n / 100.0,
        };
        Some(v.clamp(0.0, 1.0))
    };
    let s = fraction(args[1])?;
    let l = fraction(args[2])?;
    Some(hsl_to_rgb(h, s, l))
}

/// `h`, `s`, `l` all in `0.0..=1.0`.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        return Rgb([l, l, l]);
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    Rgb([
        channel(h + 1.0 / 3.0).clamp(0.0, 1.0),
        channel(h).clamp(0.0, 1.0),
        channel(h - 1.0 / 3.0).clamp(0.0, 1.0),
    ])
}

fn named(name: &str) -> Option<Rgb> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, hex)| Rgb::from_hex_u32(hex))
}

const NAMED_COLORS: &[(&str, u32)] = &[
    ("aliceblue", 0xf0f8ff), ("antiquewhite", 0xfaebd7), ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4), ("azure", 0xf0ffff), ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4), ("black", 0x000000), ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff), ("blueviolet", 0x8a2be2), ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887), ("cadetblue", 0x5f9ea0), ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e), ("coral", 0xff7f50), ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc), ("crimson", 0xdc143c), ("cyan", 0x00ffff),
    ("darkblue", 0x00008b), ("darkcyan", 0x008b8b), ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9), ("darkgreen", 0x006400), ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b), ("darkmagenta", 0x8b008b), ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00), ("darkorchid", 0x9932cc), ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a), ("darkseagreen", 0x8fbc8f), ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f), ("darkslategrey", 0x2f4f4f), ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3), ("deeppink", 0xff1493), ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969), ("dimgrey", 0x696969), ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222), ("floralwhite", 0xfffaf0), ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff), ("gainsboro", 0xdcdcdc), ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700), ("goldenrod", 0xdaa520), ("gray", 0x808080),
    ("green", 0x008000), ("greenyellow", 0xadff2f), ("grey", 0x808080),
    ("honeydew", 0xf0fff0), ("hotpink", 0xff69b4), ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082), ("ivory", 0xfffff0), ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa), ("lavenderblush", 0xfff0f5), ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd), ("lightblue", 0xadd8e6), ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff), ("lightgoldenrodyellow", 0xfafad2), ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90), ("lightgrey", 0xd3d3d3), ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a), ("lightseagreen", 0x20b2aa), ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899), ("lightslategrey", 0x778899), ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0), ("lime", 0x00ff00), ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6), ("magenta", 0xff00ff), ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa), ("mediumblue", 0x0000cd), ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db), ("mediumseagreen", 0x3cb371), ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a), ("mediumturquoise", 0x48d1cc), ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970), ("mintcream", 0xf5fffa), ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5), ("navajowhite", 0xffdead), ("navy", 0x000080),
    ("oldlace", 0xfdf5e6), ("olive", 0x808000), ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500), ("orangered", 0xff4500), ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa), ("palegreen", 0x98fb98), ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093), ("papayawhip", 0xffefd5), ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f), ("pink", 0xffc0cb), ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6), ("purple", 0x800080), ("rebeccapurple", 0x663399),
    ("red", 0xff0000), ("rosybrown", 0xbc8f8f), ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513), ("salmon", 0xfa8072), ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57), ("seashell", 0xfff5ee), ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0), ("skyblue", 0x87ceeb), ("slateblue", 0x6a5acd),
    ("slategray", 0x708090), ("slategrey", 0x708090), ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f), ("steelblue", 0x4682b4), ("tan", 0xd2b48c),
    ("teal", 0x008080), ("thistle", 0xd8bfd8), ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0), ("violet", 0xee82ee), ("wheat", 0xf5deb3),
    ("white", 0xffffff), ("whitesmoke", 0xf5f5f5), ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];
