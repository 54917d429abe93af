use crate::shader::grid::PackMode;
use crate::shader::renderer::{FieldShader, ShaderRenderer};
use crate::surface::buffer::Surface;
use crate::theme::palette::Theme;
use crate::RenderError;

/// Depth extent a scene drew in, nearest first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Range covering every value, or `None` for an empty iterator.
    pub fn of(values: impl IntoIterator<Item = f32>) -> Option<Self> {
        values.into_iter().fold(None, |range, z| match range {
            None => Some(Self::new(z, z)),
            Some(Self { min, max }) => Some(Self::new(min.min(z), max.max(z))),
        })
    }
}

/// A per-frame producer: draws one frame into a fresh surface.
///
/// Scenes own whatever state they carry between frames. That state is only
/// cleared through [`Scene::reset`], and must only advance when `time` does:
/// a paused driver keeps calling `render` with the same time.
pub trait Scene {
    fn name(&self) -> &str;

    fn render(
        &mut self,
        surface: &mut Surface,
        time: f32,
        theme: &dyn Theme,
    ) -> Result<DepthRange, RenderError>;

    fn reset(&mut self) {}

    /// Switch glyph packing, for scenes that have one. Returns the new mode.
    fn toggle_pack_mode(&mut self) -> Option<PackMode> {
        None
    }
}

/// Runs a [`FieldShader`] as a scene.
///
/// The renderer and its virtual grid are built on first use and kept until
/// the surface size or packing mode changes.
pub struct ShaderScene<S> {
    name: String,
    shader: S,
    mode: PackMode,
    renderer: Option<ShaderRenderer>,
}

impl<S: FieldShader> ShaderScene<S> {
    pub fn new(name: impl Into<String>, shader: S, mode: PackMode) -> Self {
        Self { name: name.into(), shader, mode, renderer: None }
    }

    pub fn mode(&self) -> PackMode {
        self.mode
    }
}

impl<S: FieldShader> Scene for ShaderScene<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(
        &mut self,
        surface: &mut Surface,
        time: f32,
        theme: &dyn Theme,
    ) -> Result<DepthRange, RenderError> {
        let (columns, rows) = (surface.width(), surface.height());
        let renderer = match self.renderer.take() {
            Some(renderer) if renderer.fits(columns, rows, self.mode) => renderer,
            _ => ShaderRenderer::new(columns, rows, self.mode)?,
        };
        let renderer = self.renderer.insert(renderer);

        renderer.render(surface, time, &self.shader, theme.gradient())?;
        Ok(DepthRange::new(0.0, 1.0))
    }

    fn toggle_pack_mode(&mut self) -> Option<PackMode> {
        self.mode = self.mode.toggled();
        Some(self.mode)
    }
}
