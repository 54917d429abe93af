use crate::surface::cell::Color;
use crate::RenderError;

/// Ordered color ramp, index 0 is far and the last entry is near.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    colors: Vec<Color>,
}

impl Gradient {
    pub fn new(colors: impl Into<Vec<Color>>) -> Result<Self, RenderError> {
        let colors = colors.into();
        if colors.is_empty() {
            return Err(RenderError::EmptyGradient);
        }
        Ok(Self { colors })
    }

    pub(crate) fn from_rgb(stops: &[[u8; 3]]) -> Self {
        debug_assert!(!stops.is_empty());
        Self { colors: stops.iter().copied().map(Color::Rgb).collect() }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Map a unit value onto the ramp, truncating toward the far end.
    pub fn index_for(&self, value: f32) -> usize {
        let levels = (self.colors.len() - 1) as f32;
        let idx = (value * levels).clamp(0.0, levels);
        idx as usize
    }

    pub fn color_at(&self, index: usize) -> Color {
        self.colors[index.min(self.colors.len() - 1)]
    }

    pub fn color_for(&self, value: f32) -> Color {
        self.color_at(self.index_for(value))
    }
}
