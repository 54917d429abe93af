use super::plane::Plane;
use crate::RenderError;

/// 4x4 ordered-dither (Bayer) thresholds, in sixteenths.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// How sub-cells are packed into terminal glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PackMode {
    /// One column by two rows per cell, half-block glyphs.
    #[default]
    Block,
    /// Two columns by four rows per cell, Braille glyphs.
    Braille,
}

impl PackMode {
    /// Sub-cells per terminal cell as `(horizontal, vertical)`.
    pub fn factors(self) -> (usize, usize) {
        match self {
            PackMode::Block => (1, 2),
            PackMode::Braille => (2, 4),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PackMode::Block => PackMode::Braille,
            PackMode::Braille => PackMode::Block,
        }
    }
}

/// Sub-cell coordinate mesh and tiled dither matrix for one terminal size.
///
/// `u` runs from `-aspect` on the left edge toward `+aspect`, `v` from `1.0`
/// on the top row toward `-1.0`, where `aspect = columns / rows`.
#[derive(Clone, Debug)]
pub struct VirtualGrid {
    columns: u16,
    rows: u16,
    mode: PackMode,
    u: Plane<f32>,
    v: Plane<f32>,
    dither: Plane<f32>,
}

impl VirtualGrid {
    pub fn new(columns: u16, rows: u16, mode: PackMode) -> Result<Self, RenderError> {
        if columns == 0 || rows == 0 {
            return Err(RenderError::EmptyViewport);
        }

        let (fx, fy) = mode.factors();
        let width = usize::from(columns) * fx;
        let height = usize::from(rows) * fy;
        let aspect = f32::from(columns) / f32::from(rows);

        let u = Plane::from_fn(width, height, |x, _| {
            ((x as f32 / width as f32) * 2.0 - 1.0) * aspect
        });
        let v = Plane::from_fn(width, height, |_, y| 1.0 - (y as f32 / height as f32) * 2.0);
        let dither = Plane::from_fn(width, height, |x, y| {
            f32::from(BAYER_4X4[y % 4][x % 4]) / 16.0 - 0.5
        });

        Ok(Self { columns, rows, mode, u, v, dither })
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn mode(&self) -> PackMode {
        self.mode
    }

    /// Virtual resolution as `(width, height)`.
    pub fn dims(&self) -> (usize, usize) {
        self.u.dims()
    }

    pub fn u(&self) -> &Plane<f32> {
        &self.u
    }

    pub fn v(&self) -> &Plane<f32> {
        &self.v
    }

    pub fn dither(&self) -> &Plane<f32> {
        &self.dither
    }
}
