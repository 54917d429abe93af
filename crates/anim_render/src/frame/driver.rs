use super::clock::FrameClock;
use super::scene::{DepthRange, Scene};
use crate::surface::buffer::Surface;
use crate::theme::palette::Theme;
use crate::RenderError;

/// Depth of the status line; nearer than anything a scene draws.
pub const STATS_DEPTH: f32 = -1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverConfig {
    pub fps: u32,
    /// Animation time multiplier.
    pub speed: f32,
    pub show_stats: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { fps: 20, speed: 0.5, show_stats: true }
    }
}

/// One serialized frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub index: u64,
    pub text: String,
    pub depth_range: DepthRange,
}

/// Steps scenes frame by frame.
///
/// Every frame gets a fresh [`Surface`]. A scene failure is returned to the
/// caller and the half-drawn surface is dropped without being serialized.
#[derive(Clone, Debug)]
pub struct FrameDriver {
    clock: FrameClock,
    paused: bool,
    show_stats: bool,
    frame_count: u64,
}

impl FrameDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            clock: FrameClock::new(config.fps, config.speed),
            paused: false,
            show_stats: config.show_stats,
            frame_count: 0,
        }
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_stats(&mut self) -> bool {
        self.show_stats = !self.show_stats;
        self.show_stats
    }

    /// Render one frame of `scene` at `width` x `height` cells.
    ///
    /// Time only advances on success and while not paused.
    pub fn render_frame(
        &mut self,
        scene: &mut dyn Scene,
        theme: &dyn Theme,
        width: u16,
        height: u16,
    ) -> Result<Frame, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyViewport);
        }

        let mut surface = Surface::new(width, height);
        let depth_range = scene.render(&mut surface, self.clock.time(), theme)?;

        if self.show_stats && height > 2 {
            let line = self.stats_line(scene.name(), theme.name(), usize::from(width));
            let row = i32::from(height) - 1;
            surface.put_str(0, row, &line, STATS_DEPTH, Some(theme.accent_color()));
        }

        let frame = Frame { index: self.frame_count, text: surface.serialize(), depth_range };

        if !self.paused {
            self.clock.advance();
        }
        self.frame_count += 1;

        Ok(frame)
    }

    /// Status text padded or truncated to exactly `width` characters.
    pub fn stats_line(&self, scene: &str, theme: &str, width: usize) -> String {
        let paused = if self.paused { " [PAUSED]" } else { "" };
        let stats = format!(
            " {scene} | Theme: {theme} | Speed: {:.2}x | [Q]uit [SPACE]Pause [T]heme [+/-]Speed{paused} ",
            self.clock.speed()
        );

        let len = stats.chars().count();
        if len < width {
            let mut stats = stats;
            stats.extend(std::iter::repeat(' ').take(width - len));
            stats
        } else {
            stats.chars().take(width).collect()
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(DriverConfig::default())
    }
}
