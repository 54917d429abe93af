use std::fmt;

/// SGR sequence closing any open foreground color.
pub const RESET: &str = "\x1b[0m";

/// Foreground color of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// 24-bit color, emitted as `ESC[38;2;r;g;bm`.
    Rgb([u8; 3]),
    /// Basic SGR foreground code, emitted as `ESC[<n>m`.
    Sgr(u8),
}

impl Color {
    pub const BRIGHT_RED: Color = Color::Sgr(91);
    pub const BRIGHT_GREEN: Color = Color::Sgr(92);
    pub const BRIGHT_YELLOW: Color = Color::Sgr(93);
    pub const BRIGHT_MAGENTA: Color = Color::Sgr(95);
    pub const BRIGHT_CYAN: Color = Color::Sgr(96);
    pub const BRIGHT_WHITE: Color = Color::Sgr(97);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb([r, g, b])
    }

    /// Convert unit-range channels, truncating toward zero after scaling.
    pub fn from_unit(rgb: [f32; 3]) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;
        Color::Rgb([channel(rgb[0]), channel(rgb[1]), channel(rgb[2])])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb([r, g, b]) => write!(f, "\x1b[38;2;{r};{g};{b}m"),
            Color::Sgr(code) => write!(f, "\x1b[{code}m"),
        }
    }
}

/// A single compositing cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    /// Lower is nearer the camera.
    pub depth: f32,
    pub color: Option<Color>,
    /// Only consulted by glow diffusion.
    pub intensity: f32,
}

impl Cell {
    pub const EMPTY: Cell = Cell { ch: ' ', depth: f32::INFINITY, color: None, intensity: 0.0 };

    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes() {
        assert_eq!(Color::rgb(1, 22, 255).to_string(), "\x1b[38;2;1;22;255m");
        assert_eq!(Color::BRIGHT_WHITE.to_string(), "\x1b[97m");
    }

    #[test]
    fn unit_channels_truncate() {
        assert_eq!(Color::from_unit([1.0, 0.5, -3.0]), Color::rgb(255, 127, 0));
    }

    #[test]
    fn empty_cell() {
        let cell = Cell::default();
        assert!(cell.is_blank());
        assert_eq!(cell.depth, f32::INFINITY);
        assert_eq!(cell.color, None);
        assert_eq!(cell.intensity, 0.0);
    }
}
