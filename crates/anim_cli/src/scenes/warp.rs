use anim_render::{lerp, smoothstep, Field, Plane};

const OCTAVES: usize = 4;

fn hash(x: f32, y: f32) -> f32 {
    let h = (x * 127.1 + y * 311.7).sin() * 43_758.547;
    h - h.floor()
}

/// Value noise in `[0, 1]`.
fn noise(x: f32, y: f32) -> f32 {
    let (ix, iy) = (x.floor(), y.floor());
    let (fx, fy) = (smoothstep(x - ix), smoothstep(y - iy));

    let a = hash(ix, iy);
    let b = hash(ix + 1.0, iy);
    let c = hash(ix, iy + 1.0);
    let d = hash(ix + 1.0, iy + 1.0);

    lerp(lerp(a, b, fx), lerp(c, d, fx), fy)
}

fn fbm(mut x: f32, mut y: f32) -> f32 {
    let mut amplitude = 0.5;
    let mut total = 0.0;
    for _ in 0..OCTAVES {
        total += amplitude * noise(x, y);
        x *= 2.0;
        y *= 2.0;
        amplitude *= 0.5;
    }
    total
}

/// Two levels of fbm feeding back into its own coordinates.
pub fn shade(u: &Plane<f32>, v: &Plane<f32>, t: f32) -> Field {
    Field::Scalar(u.zip_map(v, |x, y| {
        let (x, y) = (x * 1.5, y * 1.5);
        let qx = fbm(x + t * 0.1, y);
        let qy = fbm(x + 5.2, y + 1.3 - t * 0.1);
        let rx = fbm(x + 4.0 * qx + 1.7, y + 4.0 * qy + 9.2 + t * 0.15);
        let ry = fbm(x + 4.0 * qx + 8.3, y + 4.0 * qy + 2.8);
        smoothstep((fbm(x + 4.0 * rx, y + 4.0 * ry) * 1.6 - 0.3).clamp(0.0, 1.0))
    }))
}
