mod frame;
mod geometry;
mod shader;
mod surface;
mod theme;

pub use frame::{
    clock::{FrameClock, SPEED_PRESETS},
    driver::{DriverConfig, Frame, FrameDriver, STATS_DEPTH},
    scene::{DepthRange, Scene, ShaderScene},
};
pub use geometry::{
    projection::{
        default_scale, project, project_precise, Camera, ScreenPoint, DEFAULT_DISTANCE, NEAR_PLANE,
    },
    vector::{lerp, map_range, smoothstep, Vec3},
};
pub use shader::{
    grid::{PackMode, VirtualGrid, BAYER_4X4},
    pack::{
        block_glyph, block_mask, braille_glyph, braille_mask, PackedCell, BLOCK_THRESHOLD,
        BRAILLE_THRESHOLD, BRAILLE_WEIGHTS,
    },
    plane::Plane,
    renderer::{Field, FieldShader, ShaderRenderer, DITHER_MAGNITUDE, SHADER_DEPTH},
};
pub use surface::{
    buffer::{Surface, GLOW_RAMP},
    cell::{Cell, Color, RESET},
    lines::{LOWER_HALF, UPPER_HALF},
    serialize::{decode, DecodedFrame},
};
pub use theme::{
    gradient::Gradient,
    palette::{Palette, Theme, ThemeCycle},
};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader field is {actual:?}, expected {expected:?}")]
    FieldShape { expected: (usize, usize), actual: (usize, usize) },
    #[error("gradient must contain at least one color")]
    EmptyGradient,
    #[error("surface has no cells")]
    EmptyViewport,
    #[error("producer failed: {0}")]
    Producer(String),
    #[error("malformed frame text on line {line}: {reason}")]
    Decode { line: usize, reason: String },
}
