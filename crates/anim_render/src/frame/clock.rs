use std::time::Duration;

pub const SPEED_PRESETS: [f32; 6] = [0.25, 0.5, 1.0, 2.0, 5.0, 10.0];

pub const MIN_FPS: u32 = 10;
pub const MAX_FPS: u32 = 120;
pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 10.0;

/// Animation time and frame pacing.
///
/// Time advances by one frame interval scaled by the speed multiplier, so a
/// slow or paused terminal does not make animations skip ahead.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameClock {
    time: f32,
    fps: u32,
    speed: f32,
}

impl FrameClock {
    pub fn new(fps: u32, speed: f32) -> Self {
        let mut clock = Self { time: 0.0, fps: 0, speed: 0.0 };
        clock.set_fps(fps);
        clock.set_speed(speed);
        clock
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_fps(&mut self, fps: u32) {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Step to the next faster preset, staying put at the fastest.
    pub fn increase_speed(&mut self) -> f32 {
        if let Some(&preset) = SPEED_PRESETS.iter().find(|&&preset| preset > self.speed) {
            self.speed = preset;
        }
        self.speed
    }

    /// Step to the next slower preset, staying put at the slowest.
    pub fn decrease_speed(&mut self) -> f32 {
        if let Some(&preset) = SPEED_PRESETS.iter().rev().find(|&&preset| preset < self.speed) {
            self.speed = preset;
        }
        self.speed
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    pub fn advance(&mut self) {
        self.time += self.speed / self.fps as f32;
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    /// Time left in the current frame after `elapsed` was spent on it.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_interval().saturating_sub(elapsed)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(20, 0.5)
    }
}
