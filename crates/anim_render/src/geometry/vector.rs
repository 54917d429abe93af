use std::ops::{Add, Mul, Sub};

/// A point or direction in model space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate around the X axis; `x` is left untouched.
    pub fn rotate_x(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: self.x, y: self.y * cos - self.z * sin, z: self.y * sin + self.z * cos }
    }

    /// Rotate around the Y axis; `y` is left untouched.
    pub fn rotate_y(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: self.x * cos + self.z * sin, y: self.y, z: -self.x * sin + self.z * cos }
    }

    /// Rotate around the Z axis; `z` is left untouched.
    pub fn rotate_z(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos, z: self.z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction. The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Vec3::ZERO;
        }
        self * (1.0 / length)
    }
}

impl From<(f32, f32, f32)> for Vec3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self { x, y, z }
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Linearly remap `value` from one range to another.
///
/// A degenerate input range maps everything to `out_min`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn rotation_keeps_axis_coordinate() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p.rotate_x(0.7).x, 1.0);
        assert_eq!(p.rotate_y(0.7).y, 2.0);
        assert_eq!(p.rotate_z(0.7).z, 3.0);
    }

    #[test]
    fn quarter_turns() {
        assert!(approx(Vec3::new(0.0, 1.0, 0.0).rotate_x(FRAC_PI_2), Vec3::new(0.0, 0.0, 1.0)));
        assert!(approx(Vec3::new(1.0, 0.0, 0.0).rotate_y(FRAC_PI_2), Vec3::new(0.0, 0.0, -1.0)));
        assert!(approx(Vec3::new(1.0, 0.0, 0.0).rotate_z(FRAC_PI_2), Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn rotation_preserves_length() {
        let p = Vec3::new(-1.5, 0.25, 4.0);
        let r = p.rotate_x(1.1).rotate_y(-0.4).rotate_z(2.9);
        assert!((p.length() - r.length()).abs() < 1e-4);
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert!((Vec3::new(3.0, 0.0, 4.0).normalize().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn map_range_degenerate() {
        assert_eq!(map_range(3.0, 1.0, 1.0, 5.0, 9.0), 5.0);
        assert_eq!(map_range(0.5, 0.0, 1.0, 10.0, 20.0), 15.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_eq!(smoothstep(0.5), 0.5);
    }
}
