use std::f32::consts::PI;

use anim_render::{Field, Plane};

/// Classic sine plasma with a per-channel phase shift.
pub fn shade(u: &Plane<f32>, v: &Plane<f32>, t: f32) -> Field {
    Field::Color(u.zip_map(v, |x, y| {
        let radial = ((x * x + y * y).sqrt() * 4.0 - t * 2.0).sin();
        let value = (x * 3.0 + t).sin() + (y * 2.0 - t * 0.7).sin() + radial;
        let phase = value * PI * 0.5;
        [
            0.5 + 0.5 * phase.sin(),
            0.5 + 0.5 * (phase + 2.0 * PI / 3.0).sin(),
            0.5 + 0.5 * (phase + 4.0 * PI / 3.0).sin(),
        ]
    }))
}
