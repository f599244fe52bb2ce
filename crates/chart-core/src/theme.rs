// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming and the qualitative series palette.

/// Renderer-agnostic RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self::from_argb(255, (hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `#rrggbb`, alpha is written separately as an opacity.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn opacity(&self) -> f64 { self.a as f64 / 255.0 }
}

/// Ten-color qualitative palette (category10).
pub const CATEGORY10: [Color; 10] = [
    Color::from_rgb_hex(0x1f77b4),
    Color::from_rgb_hex(0xff7f0e),
    Color::from_rgb_hex(0x2ca02c),
    Color::from_rgb_hex(0xd62728),
    Color::from_rgb_hex(0x9467bd),
    Color::from_rgb_hex(0x8c564b),
    Color::from_rgb_hex(0xe377c2),
    Color::from_rgb_hex(0x7f7f7f),
    Color::from_rgb_hex(0xbcbd22),
    Color::from_rgb_hex(0x17becf),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub zero_line: Color,
    pub legend_label: Color,
    pub palette: [Color; 10],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 255, 255, 255),
            grid: Color::from_argb(255, 225, 225, 230),
            axis_line: Color::from_argb(255, 0, 0, 0),
            axis_label: Color::from_argb(255, 20, 20, 30),
            zero_line: Color::from_argb(255, 120, 120, 130),
            legend_label: Color::from_argb(255, 20, 20, 30),
            palette: CATEGORY10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            grid: Color::from_argb(255, 40, 40, 45),
            axis_line: Color::from_argb(255, 180, 180, 190),
            axis_label: Color::from_argb(255, 235, 235, 245),
            zero_line: Color::from_argb(255, 150, 150, 160),
            legend_label: Color::from_argb(255, 235, 235, 245),
            palette: CATEGORY10,
        }
    }

    /// Color of a series, keyed by its position in the series-name domain.
    /// Names outside the domain are appended after it, as an ordinal scale would.
    pub fn series_color(&self, name: &str, domain: &[String]) -> Color {
        let idx = domain.iter().position(|d| d == name).unwrap_or(domain.len());
        self.palette[idx % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
