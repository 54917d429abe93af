use std::f32::consts::TAU;

use anim_render::{Camera, DepthRange, RenderError, Scene, Surface, Theme, Vec3};

/// A three-axis Lissajous knot traced with sub-cell strokes.
pub struct Lissajous {
    samples: usize,
    ratios: (f32, f32, f32),
}

impl Default for Lissajous {
    fn default() -> Self {
        Self { samples: 240, ratios: (3.0, 2.0, 5.0) }
    }
}

impl Lissajous {
    fn point(&self, s: f32, time: f32) -> Vec3 {
        let (a, b, c) = self.ratios;
        Vec3::new((a * s + time).sin(), (b * s).sin(), (c * s + time * 0.5).sin()) * 2.2
    }
}

impl Scene for Lissajous {
    fn name(&self) -> &str {
        "Lissajous"
    }

    fn render(
        &mut self,
        surface: &mut Surface,
        time: f32,
        theme: &dyn Theme,
    ) -> Result<DepthRange, RenderError> {
        let points: Vec<Vec3> = (0..=self.samples)
            .map(|i| {
                let s = i as f32 / self.samples as f32 * TAU;
                self.point(s, time).rotate_y(time * 0.4).rotate_x(0.3)
            })
            .collect();

        let Some(range) = DepthRange::of(points.iter().map(|p| p.z)) else {
            return Ok(DepthRange::new(0.0, 1.0));
        };
        let camera = Camera::new(surface.width(), surface.height());

        for pair in points.windows(2) {
            let (Some(from), Some(to)) =
                (camera.project_precise(pair[0]), camera.project_precise(pair[1]))
            else {
                continue;
            };
            let depth = (pair[0].z + pair[1].z) / 2.0;
            let color = theme.color_for_depth(depth, range.min, range.max);
            surface.draw_line_subpixel(from, to, depth, Some(color));
        }

        Ok(range)
    }
}
