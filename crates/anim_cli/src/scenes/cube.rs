use anim_render::{Camera, DepthRange, RenderError, Scene, Surface, Theme, Vec3};

const SIZE: f32 = 3.5;

const VERTICES: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Rotating wireframe cube.
pub struct Cube;

impl Scene for Cube {
    fn name(&self) -> &str {
        "Cube"
    }

    fn render(
        &mut self,
        surface: &mut Surface,
        time: f32,
        theme: &dyn Theme,
    ) -> Result<DepthRange, RenderError> {
        let points = VERTICES.map(|[x, y, z]| {
            (Vec3::new(x, y, z) * SIZE)
                .rotate_x(time * 0.8)
                .rotate_y(time * 0.6)
                .rotate_z(time * 0.3)
        });

        let range = DepthRange::of(points.iter().map(|p| p.z))
            .ok_or_else(|| RenderError::Producer("cube has no vertices".into()))?;
        let camera = Camera::new(surface.width(), surface.height());

        for (a, b) in EDGES {
            let (Some(from), Some(to)) = (camera.project(points[a]), camera.project(points[b]))
            else {
                continue;
            };

            let depth = (points[a].z + points[b].z) / 2.0;
            let color = theme.color_for_depth(depth, range.min, range.max);
            // Nearer edges are drawn heavier.
            let (ch, thickness) = if depth < 0.0 { ('█', 2) } else { ('≡', 1) };
            surface.draw_thick_line(from, to, ch, depth, Some(color), thickness);
        }

        for point in points {
            if let Some((x, y)) = camera.project(point) {
                surface.set_with_glow(x, y, '●', point.z - 0.2, Some(theme.accent_color()), 2);
            }
        }

        Ok(range)
    }
}
