//! Line rasterization on top of depth-tested cell writes.

use super::buffer::Surface;
use super::cell::Color;
use crate::geometry::projection::ScreenPoint;

pub const UPPER_HALF: char = '▀';
pub const LOWER_HALF: char = '▄';

/// Depth bias for the offset strokes of a thick line.
pub const THICK_DEPTH_OFFSET: f32 = 0.01;

impl Surface {
    /// Bresenham line, inclusive of both endpoints.
    pub fn draw_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        ch: char,
        depth: f32,
        color: Option<Color>,
    ) {
        let (mut x, mut y) = from;
        let (x1, y1) = to;
        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.set(x, y, ch, depth, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Approximate a wider stroke with offset copies of the base line.
    ///
    /// Thickness 2 adds a copy one cell right, thickness 3 and up also adds
    /// copies one cell down and one down-right. Copies sit slightly behind the
    /// base stroke so they never win against it.
    pub fn draw_thick_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        ch: char,
        depth: f32,
        color: Option<Color>,
        thickness: u8,
    ) {
        self.draw_line(from, to, ch, depth, color);

        if thickness <= 1 {
            return;
        }

        let behind = depth + THICK_DEPTH_OFFSET;
        let shift = |(x, y): ScreenPoint, dx: i32, dy: i32| (x + dx, y + dy);

        self.draw_line(shift(from, 1, 0), shift(to, 1, 0), ch, behind, color);

        if thickness > 2 {
            self.draw_line(shift(from, 0, 1), shift(to, 0, 1), ch, behind, color);
            self.draw_line(shift(from, 1, 1), shift(to, 1, 1), ch, behind, color);
        }
    }

    /// Line sampled at twice its cell length, picking an upper or lower half
    /// block from the vertical fraction of each sample.
    pub fn draw_line_subpixel(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        depth: f32,
        color: Option<Color>,
    ) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let length = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0);
        let steps = (length * 2.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps.max(1) as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;

            let ch = if y - y.trunc() > 0.5 { LOWER_HALF } else { UPPER_HALF };
            self.set(x as i32, y as i32, ch, depth, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(surface: &Surface) -> Vec<(i32, i32)> {
        let width = i32::from(surface.width());
        surface
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_blank())
            .map(|(i, _)| (i as i32 % width, i as i32 / width))
            .collect()
    }

    #[test]
    fn horizontal_and_diagonal_lines() {
        let mut surface = Surface::new(6, 6);
        surface.draw_line((0, 0), (3, 0), '-', 0.0, None);
        surface.draw_line((0, 2), (3, 5), '\\', 0.0, None);
        assert_eq!(
            lit(&surface),
            vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 2), (1, 3), (2, 4), (3, 5)]
        );
    }

    #[test]
    fn line_endpoints_are_symmetric() {
        let mut forward = Surface::new(10, 10);
        forward.draw_line((1, 1), (8, 4), '#', 0.0, None);
        let cells = lit(&forward);
        assert!(cells.contains(&(1, 1)));
        assert!(cells.contains(&(8, 4)));
        assert_eq!(cells.len(), 8);
    }

    #[test]
    fn line_clips_silently() {
        let mut surface = Surface::new(3, 1);
        surface.draw_line((-5, 0), (10, 0), '=', 0.0, None);
        assert_eq!(lit(&surface), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn thick_line_offsets_sit_behind() {
        let mut surface = Surface::new(5, 3);
        surface.draw_thick_line((0, 0), (2, 0), '#', 1.0, None, 3);

        assert_eq!(surface.get(0, 0).unwrap().depth, 1.0);
        assert_eq!(surface.get(2, 0).unwrap().depth, 1.0);
        assert_eq!(surface.get(3, 0).unwrap().depth, 1.01);
        assert_eq!(surface.get(0, 1).unwrap().depth, 1.01);
        assert_eq!(surface.get(3, 1).unwrap().depth, 1.01);
        assert!(surface.get(0, 2).unwrap().is_blank());
    }

    #[test]
    fn thickness_two_only_shifts_right() {
        let mut surface = Surface::new(4, 2);
        surface.draw_thick_line((0, 0), (1, 0), '#', 0.0, None, 2);
        assert_eq!(lit(&surface), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn subpixel_picks_half_blocks() {
        let mut surface = Surface::new(4, 2);
        surface.draw_line_subpixel((0.0, 0.75), (2.0, 0.75), 0.0, None);
        assert_eq!(surface.get(0, 0).unwrap().ch, LOWER_HALF);
        assert_eq!(surface.get(2, 0).unwrap().ch, LOWER_HALF);

        let mut surface = Surface::new(4, 2);
        surface.draw_line_subpixel((0.0, 1.25), (3.0, 1.25), 0.0, None);
        assert_eq!(surface.rows().nth(1).unwrap(), "▀▀▀▀");
    }
}
