use super::vector::Vec3;

/// Closest `z + distance` a point may have before it is culled.
pub const NEAR_PLANE: f32 = 0.1;

/// Camera distance used by most scenes.
pub const DEFAULT_DISTANCE: f32 = 5.0;

/// Integer cell coordinate on the surface. May lie off-surface.
pub type ScreenPoint = (i32, i32);

/// Scale applied when the caller does not provide one.
///
/// Character cells are roughly twice as tall as they are wide, so the
/// vertical extent counts double.
pub fn default_scale(width: u16, height: u16) -> f32 {
    f32::from(width).min(f32::from(height) * 2.0) * 0.3
}

/// Perspective-project a point onto a `width` x `height` cell viewport.
///
/// Returns `None` when the point sits behind or too close to the camera
/// (`z + distance <= 0.1`); callers must skip drawing it.
pub fn project(
    point: Vec3,
    width: u16,
    height: u16,
    distance: f32,
    scale: Option<f32>,
) -> Option<ScreenPoint> {
    let (x, y) = project_precise(point, width, height, distance, scale)?;
    Some((x as i32, y as i32))
}

/// Same as [`project`] without truncating to whole cells, for sub-cell
/// strokes.
pub fn project_precise(
    point: Vec3,
    width: u16,
    height: u16,
    distance: f32,
    scale: Option<f32>,
) -> Option<(f32, f32)> {
    let denom = point.z + distance;
    if denom <= NEAR_PLANE {
        return None;
    }

    let scale = scale.unwrap_or_else(|| default_scale(width, height));
    let factor = scale / denom;

    // Horizontal term doubled for the cell aspect ratio.
    let x = point.x * factor * 2.0 + f32::from(width) / 2.0;
    let y = point.y * factor + f32::from(height) / 2.0;

    Some((x, y))
}

/// Viewport-bound projection with a fixed camera distance and scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub width: u16,
    pub height: u16,
    pub distance: f32,
    pub scale: Option<f32>,
}

impl Camera {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, distance: DEFAULT_DISTANCE, scale: None }
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn project(&self, point: Vec3) -> Option<ScreenPoint> {
        project(point, self.width, self.height, self.distance, self.scale)
    }

    pub fn project_precise(&self, point: Vec3) -> Option<(f32, f32)> {
        project_precise(point, self.width, self.height, self.distance, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_lands_in_the_middle() {
        assert_eq!(project(Vec3::ZERO, 80, 24, 5.0, None), Some((40, 12)));
    }

    #[test]
    fn culls_at_and_behind_near_plane() {
        assert_eq!(project(Vec3::new(0.0, 0.0, -4.95), 80, 24, 5.0, None), None);
        assert_eq!(project(Vec3::new(0.0, 0.0, -6.0), 80, 24, 5.0, None), None);
        // denom == 0.1 exactly is still culled
        assert_eq!(project(Vec3::new(0.0, 0.0, 0.0), 80, 24, NEAR_PLANE, None), None);
        assert!(project(Vec3::new(0.0, 0.0, -4.5), 80, 24, 5.0, None).is_some());
    }

    #[test]
    fn horizontal_term_is_doubled() {
        // factor = 10 / 5 = 2
        let (x, y) = project(Vec3::new(1.0, 1.0, 0.0), 80, 24, 5.0, Some(10.0)).unwrap();
        assert_eq!(x, 40 + 4);
        assert_eq!(y, 12 + 2);
    }

    #[test]
    fn default_scale_uses_shorter_side() {
        assert!((default_scale(80, 24) - 14.4).abs() < 1e-5);
        assert!((default_scale(40, 100) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn camera_matches_free_function() {
        let camera = Camera::new(100, 30).with_distance(7.0);
        let p = Vec3::new(0.5, -1.0, 2.0);
        assert_eq!(camera.project(p), project(p, 100, 30, 7.0, None));
    }

    #[test]
    fn camera_scale_overrides_default() {
        let camera = Camera { scale: Some(10.0), ..Camera::new(80, 24) };
        assert_eq!(camera.project(Vec3::new(1.0, 1.0, 0.0)), Some((44, 14)));
    }

    #[test]
    fn precise_projection_keeps_fraction() {
        let (x, y) = project_precise(Vec3::new(0.25, 0.25, 0.0), 10, 10, 5.0, Some(5.0)).unwrap();
        assert_eq!((x, y), (5.5, 5.25));
        assert_eq!(project(Vec3::new(0.25, 0.25, 0.0), 10, 10, 5.0, Some(5.0)), Some((5, 5)));
    }
}
