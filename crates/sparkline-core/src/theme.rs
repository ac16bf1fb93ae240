// File: crates/sparkline-core/src/theme.rs
// Summary: Light/Dark theming for sampled-series rendering colors (backend-neutral RGBA).

/// Straight-alpha 8-bit colour. Backends convert to their own colour types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb` for opaque colours, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub label: Rgba,
    pub up: Rgba,
    pub down: Rgba,
    /// Stroke for flat series and series without a direction.
    pub muted: Rgba,
    /// Alpha applied to the stroke colour for the area fill.
    pub fill_alpha: u8,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::from_argb(255, 18, 18, 20),
            grid: Rgba::from_argb(255, 40, 40, 45),
            label: Rgba::from_argb(255, 235, 235, 245),
            up: Rgba::from_argb(255, 40, 200, 120),
            down: Rgba::from_argb(255, 220, 80, 80),
            muted: Rgba::from_argb(255, 130, 130, 140),
            fill_alpha: 96,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::from_argb(255, 250, 250, 252),
            grid: Rgba::from_argb(255, 230, 230, 235),
            label: Rgba::from_argb(255, 20, 20, 30),
            up: Rgba::from_argb(255, 20, 160, 90),
            down: Rgba::from_argb(255, 200, 60, 60),
            muted: Rgba::from_argb(255, 150, 150, 160),
            fill_alpha: 80,
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: Rgba::from_argb(255, 0x00, 0x00, 0x00),
            grid: Rgba::from_argb(255, 0x22, 0x22, 0x22),
            label: Rgba::from_argb(255, 0xff, 0xff, 0xff),
            up: Rgba::from_argb(255, 0x00, 0xff, 0x00),
            down: Rgba::from_argb(255, 0xff, 0x00, 0x00),
            muted: Rgba::from_argb(255, 0xcc, 0xcc, 0xcc),
            fill_alpha: 120,
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::dark)
}
