use super::gradient::Gradient;
use crate::surface::cell::Color;

/// Color source consumed by scenes and the shader pipeline.
pub trait Theme {
    fn name(&self) -> &str;

    fn gradient(&self) -> &Gradient;

    fn accent_color(&self) -> Color;

    /// Nearer points (lower `z`) map toward the bright end of the gradient.
    fn color_for_depth(&self, z: f32, z_min: f32, z_max: f32) -> Color {
        let nearness = if z_max == z_min { 0.5 } else { 1.0 - (z - z_min) / (z_max - z_min) };
        self.gradient().color_for(nearness.clamp(0.0, 1.0))
    }
}

/// A named built-in color theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    description: &'static str,
    gradient: Gradient,
    accent: Color,
}

struct PaletteSpec {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    stops: [[u8; 3]; 10],
    accent: Color,
}

const PALETTES: &[PaletteSpec] = &[
    PaletteSpec {
        key: "matrix",
        name: "Matrix",
        description: "Classic hacker green terminal",
        stops: [
            [0, 30, 0],
            [0, 50, 0],
            [0, 75, 0],
            [0, 100, 0],
            [0, 130, 0],
            [0, 160, 0],
            [0, 190, 0],
            [0, 220, 0],
            [50, 240, 50],
            [100, 255, 100],
        ],
        accent: Color::BRIGHT_WHITE,
    },
    PaletteSpec {
        key: "fire",
        name: "Fire",
        description: "Warm flames from red to yellow",
        stops: [
            [40, 0, 0],
            [80, 10, 0],
            [120, 25, 0],
            [160, 45, 0],
            [200, 70, 0],
            [230, 100, 0],
            [255, 130, 0],
            [255, 170, 20],
            [255, 210, 60],
            [255, 255, 100],
        ],
        accent: Color::BRIGHT_WHITE,
    },
    PaletteSpec {
        key: "ocean",
        name: "Ocean",
        description: "Cool blue depths",
        stops: [
            [0, 10, 40],
            [0, 25, 70],
            [0, 45, 100],
            [0, 70, 130],
            [0, 100, 160],
            [0, 130, 190],
            [30, 160, 210],
            [70, 190, 230],
            [120, 220, 245],
            [180, 255, 255],
        ],
        accent: Color::BRIGHT_WHITE,
    },
    PaletteSpec {
        key: "neon",
        name: "Neon",
        description: "Cyberpunk magenta and purple",
        stops: [
            [20, 0, 40],
            [40, 0, 70],
            [70, 0, 100],
            [100, 0, 140],
            [140, 20, 170],
            [170, 50, 200],
            [200, 80, 220],
            [220, 120, 240],
            [240, 160, 250],
            [255, 200, 255],
        ],
        accent: Color::BRIGHT_CYAN,
    },
    PaletteSpec {
        key: "void",
        name: "Void",
        description: "Minimalist grayscale",
        stops: [
            [20, 20, 20],
            [45, 45, 45],
            [70, 70, 70],
            [95, 95, 95],
            [120, 120, 120],
            [150, 150, 150],
            [180, 180, 180],
            [210, 210, 210],
            [235, 235, 235],
            [255, 255, 255],
        ],
        accent: Color::BRIGHT_WHITE,
    },
    PaletteSpec {
        key: "sunset",
        name: "Sunset",
        description: "Warm orange to purple gradient",
        stops: [
            [30, 0, 50],
            [60, 0, 70],
            [100, 15, 70],
            [140, 35, 60],
            [180, 60, 45],
            [210, 90, 30],
            [235, 130, 20],
            [250, 170, 40],
            [255, 200, 80],
            [255, 230, 140],
        ],
        accent: Color::BRIGHT_YELLOW,
    },
    PaletteSpec {
        key: "arctic",
        name: "Arctic",
        description: "Icy blue and white",
        stops: [
            [10, 20, 50],
            [25, 45, 80],
            [45, 75, 120],
            [70, 110, 160],
            [100, 145, 195],
            [130, 175, 220],
            [165, 200, 235],
            [195, 220, 245],
            [220, 240, 252],
            [245, 252, 255],
        ],
        accent: Color::BRIGHT_CYAN,
    },
    PaletteSpec {
        key: "forest",
        name: "Forest",
        description: "Natural green and brown",
        stops: [
            [20, 10, 5],
            [35, 25, 10],
            [50, 45, 15],
            [60, 70, 25],
            [75, 100, 40],
            [90, 130, 55],
            [110, 160, 70],
            [130, 190, 90],
            [160, 215, 115],
            [200, 240, 150],
        ],
        accent: Color::BRIGHT_GREEN,
    },
    PaletteSpec {
        key: "blood",
        name: "Blood",
        description: "Deep crimson intensity",
        stops: [
            [15, 0, 0],
            [35, 0, 0],
            [60, 5, 5],
            [90, 10, 10],
            [120, 15, 15],
            [155, 25, 25],
            [190, 35, 35],
            [220, 50, 50],
            [245, 70, 70],
            [255, 100, 100],
        ],
        accent: Color::BRIGHT_RED,
    },
    PaletteSpec {
        key: "gold",
        name: "Gold",
        description: "Luxurious golden tones",
        stops: [
            [40, 25, 0],
            [70, 45, 0],
            [100, 65, 5],
            [130, 90, 10],
            [160, 115, 20],
            [190, 145, 35],
            [215, 175, 55],
            [235, 200, 80],
            [250, 225, 110],
            [255, 245, 150],
        ],
        accent: Color::BRIGHT_YELLOW,
    },
    PaletteSpec {
        key: "isovalues",
        name: "Isovalues",
        description: "Smooth cosine rainbow spectrum",
        stops: [
            [255, 0, 0],
            [255, 150, 0],
            [255, 255, 0],
            [0, 255, 0],
            [0, 255, 150],
            [0, 255, 255],
            [0, 150, 255],
            [0, 0, 255],
            [150, 0, 255],
            [255, 0, 255],
        ],
        accent: Color::BRIGHT_CYAN,
    },
    PaletteSpec {
        key: "rainbow",
        name: "Rainbow",
        description: "Full spectrum depth mapping",
        stops: [
            [148, 0, 211],
            [75, 0, 130],
            [0, 0, 255],
            [0, 127, 255],
            [0, 255, 0],
            [127, 255, 0],
            [255, 255, 0],
            [255, 165, 0],
            [255, 69, 0],
            [255, 0, 0],
        ],
        accent: Color::BRIGHT_WHITE,
    },
    PaletteSpec {
        key: "plasma",
        name: "Plasma",
        description: "Electric blue to hot pink",
        stops: [
            [0, 0, 50],
            [20, 0, 100],
            [60, 0, 150],
            [100, 0, 180],
            [150, 30, 200],
            [180, 70, 210],
            [210, 100, 220],
            [240, 130, 225],
            [255, 170, 230],
            [255, 220, 255],
        ],
        accent: Color::BRIGHT_MAGENTA,
    },
    PaletteSpec {
        key: "toxic",
        name: "Toxic",
        description: "Radioactive green glow",
        stops: [
            [0, 20, 0],
            [20, 50, 0],
            [50, 90, 0],
            [80, 130, 0],
            [120, 170, 0],
            [160, 200, 20],
            [200, 230, 50],
            [220, 250, 80],
            [240, 255, 120],
            [255, 255, 180],
        ],
        accent: Color::BRIGHT_GREEN,
    },
    PaletteSpec {
        key: "copper",
        name: "Copper",
        description: "Warm metallic copper tones",
        stops: [
            [30, 15, 10],
            [60, 30, 20],
            [90, 50, 30],
            [125, 70, 40],
            [160, 95, 55],
            [185, 120, 75],
            [210, 150, 100],
            [230, 180, 130],
            [245, 210, 165],
            [255, 235, 200],
        ],
        accent: Color::BRIGHT_YELLOW,
    },
    PaletteSpec {
        key: "lavender",
        name: "Lavender",
        description: "Soft purple pastels",
        stops: [
            [40, 20, 60],
            [65, 40, 90],
            [90, 60, 120],
            [115, 85, 150],
            [145, 110, 175],
            [170, 140, 200],
            [195, 170, 220],
            [215, 195, 235],
            [235, 220, 248],
            [250, 245, 255],
        ],
        accent: Color::BRIGHT_MAGENTA,
    },
];

impl Palette {
    /// Lookup keys of every built-in palette, in cycling order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        PALETTES.iter().map(|spec| spec.key)
    }

    /// Case-insensitive lookup; unknown names fall back to the first palette.
    pub fn by_name(name: &str) -> Self {
        let index = Self::position(name).unwrap_or(0);
        Self::from_spec(&PALETTES[index])
    }

    fn position(name: &str) -> Option<usize> {
        PALETTES.iter().position(|spec| spec.key.eq_ignore_ascii_case(name))
    }

    fn from_spec(spec: &PaletteSpec) -> Self {
        Self {
            name: spec.name,
            description: spec.description,
            gradient: Gradient::from_rgb(&spec.stops),
            accent: spec.accent,
        }
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

impl Theme for Palette {
    fn name(&self) -> &str {
        self.name
    }

    fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    fn accent_color(&self) -> Color {
        self.accent
    }
}

/// The active built-in palette plus its position for cycling.
#[derive(Clone, Debug)]
pub struct ThemeCycle {
    index: usize,
    palette: Palette,
}

impl ThemeCycle {
    pub fn new(name: &str) -> Self {
        let index = Palette::position(name).unwrap_or(0);
        Self { index, palette: Palette::from_spec(&PALETTES[index]) }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn next(&mut self) -> &str {
        self.select((self.index + 1) % PALETTES.len())
    }

    pub fn prev(&mut self) -> &str {
        self.select((self.index + PALETTES.len() - 1) % PALETTES.len())
    }

    fn select(&mut self, index: usize) -> &str {
        self.index = index;
        self.palette = Palette::from_spec(&PALETTES[index]);
        self.palette.name
    }
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self::new("matrix")
    }
}

impl Theme for ThemeCycle {
    fn name(&self) -> &str {
        self.palette.name()
    }

    fn gradient(&self) -> &Gradient {
        self.palette.gradient()
    }

    fn accent_color(&self) -> Color {
        self.palette.accent_color()
    }
}
