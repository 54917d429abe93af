use log::debug;

use super::grid::{PackMode, VirtualGrid};
use super::pack::{pack_blocks, pack_braille, PackedCell};
use super::plane::Plane;
use crate::surface::buffer::Surface;
use crate::theme::gradient::Gradient;
use crate::RenderError;

/// Strength of the ordered dither added before thresholding.
pub const DITHER_MAGNITUDE: f32 = 0.15;

/// Depth every shader cell is written at.
pub const SHADER_DEPTH: f32 = 1.0;

/// Rec. 601 luma weights.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Output of one shader evaluation over the virtual mesh.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Scalar(Plane<f32>),
    Color(Plane<[f32; 3]>),
}

impl Field {
    pub fn dims(&self) -> (usize, usize) {
        match self {
            Field::Scalar(plane) => plane.dims(),
            Field::Color(plane) => plane.dims(),
        }
    }

    /// Scalar fields are their own luminance.
    pub fn luminance(&self) -> Plane<f32> {
        match self {
            Field::Scalar(plane) => plane.clone(),
            Field::Color(plane) => plane.map(|[r, g, b]| {
                LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
            }),
        }
    }
}

/// A full-frame field function evaluated over the whole mesh at once.
pub trait FieldShader {
    fn shade(&self, u: &Plane<f32>, v: &Plane<f32>, time: f32) -> Field;
}

impl<F> FieldShader for F
where
    F: Fn(&Plane<f32>, &Plane<f32>, f32) -> Field,
{
    fn shade(&self, u: &Plane<f32>, v: &Plane<f32>, time: f32) -> Field {
        self(u, v, time)
    }
}

/// Turns shader fields into glyphs for a fixed terminal size and mode.
#[derive(Clone, Debug)]
pub struct ShaderRenderer {
    grid: VirtualGrid,
}

impl ShaderRenderer {
    pub fn new(columns: u16, rows: u16, mode: PackMode) -> Result<Self, RenderError> {
        let grid = VirtualGrid::new(columns, rows, mode)?;
        let (width, height) = grid.dims();
        debug!("shader renderer {columns}x{rows} {mode:?}, virtual grid {width}x{height}");
        Ok(Self { grid })
    }

    pub fn grid(&self) -> &VirtualGrid {
        &self.grid
    }

    pub fn mode(&self) -> PackMode {
        self.grid.mode()
    }

    /// Whether this renderer was built for the given terminal size and mode.
    pub fn fits(&self, columns: u16, rows: u16, mode: PackMode) -> bool {
        self.grid.columns() == columns && self.grid.rows() == rows && self.grid.mode() == mode
    }

    /// Evaluate the shader, rejecting fields that do not match the mesh.
    pub fn evaluate(&self, shader: &dyn FieldShader, time: f32) -> Result<Field, RenderError> {
        let field = shader.shade(self.grid.u(), self.grid.v(), time);
        let expected = self.grid.dims();
        let actual = field.dims();
        if actual != expected {
            return Err(RenderError::FieldShape { expected, actual });
        }
        Ok(field)
    }

    /// Dither, threshold and pack a field into terminal cells.
    pub fn pack(&self, field: &Field, gradient: &Gradient) -> Plane<PackedCell> {
        let luminance = field
            .luminance()
            .add(&self.grid.dither().scale(DITHER_MAGNITUDE))
            .clip(0.0, 1.0);

        let colors = match field {
            Field::Color(rgb) => Some(rgb.map(|c| c.map(|channel| channel.clamp(0.0, 1.0)))),
            Field::Scalar(_) => None,
        };

        match self.grid.mode() {
            PackMode::Block => pack_blocks(&luminance, colors.as_ref(), gradient),
            PackMode::Braille => pack_braille(&luminance, colors.as_ref(), gradient),
        }
    }

    /// Evaluate, pack and write one frame into `surface`.
    ///
    /// Active cells are stored at [`SHADER_DEPTH`] without a depth test, so
    /// they replace whatever was drawn before and can only be covered by
    /// later writes nearer than 1.0. Inactive cells are left untouched.
    pub fn render(
        &self,
        surface: &mut Surface,
        time: f32,
        shader: &dyn FieldShader,
        gradient: &Gradient,
    ) -> Result<(), RenderError> {
        let field = self.evaluate(shader, time)?;
        let cells = self.pack(&field, gradient);

        for (y, row) in cells.rows().enumerate() {
            for (x, cell) in row.iter().enumerate().filter(|(_, cell)| cell.is_active()) {
                surface.overwrite(x as i32, y as i32, cell.ch, SHADER_DEPTH, cell.color);
            }
        }

        Ok(())
    }
}
