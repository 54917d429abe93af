use super::cell::{Cell, Color};

/// Halo glyphs from brightest to dimmest.
pub const GLOW_RAMP: [char; 3] = ['.', ':', '·'];

/// Depth offset placing a halo just behind its source.
pub const GLOW_DEPTH_OFFSET: f32 = 0.1;

/// Per-frame compositing grid with a depth buffer.
///
/// Coordinates are signed so callers can hand in projected points without
/// clipping them first; anything off the surface is silently dropped.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = usize::from(width) * usize::from(height);
        Self { width, height, cells: vec![Cell::EMPTY; len] }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Depth-tested write. Returns whether the cell was updated.
    pub fn set(&mut self, x: i32, y: i32, ch: char, depth: f32, color: Option<Color>) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };

        let cell = &mut self.cells[i];
        if depth < cell.depth {
            *cell = Cell { ch, depth, color, intensity: 1.0 };
            return true;
        }
        false
    }

    /// Unconditional write, bypassing the depth test.
    ///
    /// The cell keeps its intensity, so a later glow may still replace a cell
    /// that was only ever overwritten.
    pub fn overwrite(
        &mut self,
        x: i32,
        y: i32,
        ch: char,
        depth: f32,
        color: Option<Color>,
    ) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        let cell = &mut self.cells[i];
        *cell = Cell { ch, depth, color, intensity: cell.intensity };
        true
    }

    /// Depth-tested write of `ch` plus a dimmer halo around it.
    ///
    /// Halo cells are accepted by intensity, not depth: a neighbor is replaced
    /// when it is blank or holds a weaker intensity than the incoming glow.
    pub fn set_with_glow(
        &mut self,
        x: i32,
        y: i32,
        ch: char,
        depth: f32,
        color: Option<Color>,
        radius: i32,
    ) {
        self.set(x, y, ch, depth, color);

        if radius <= 0 {
            return;
        }

        // Nothing beyond the longer side can land on the surface.
        let radius = radius.min(i32::from(self.width.max(self.height)));
        let (x0, x1) = (x.saturating_sub(radius).max(0), x.saturating_add(radius));
        let (y0, y1) = (y.saturating_sub(radius).max(0), y.saturating_add(radius));
        let x1 = x1.min(i32::from(self.width) - 1);
        let y1 = y1.min(i32::from(self.height) - 1);

        for cy in y0..=y1 {
            for cx in x0..=x1 {
                let dx = i64::from(cx) - i64::from(x);
                let dy = i64::from(cy) - i64::from(y);
                if dx == 0 && dy == 0 {
                    continue;
                }

                let Some(i) = self.index(cx, cy) else {
                    continue;
                };

                let dist_sq = (dx * dx + dy * dy) as f32;
                if dist_sq.sqrt() > radius as f32 {
                    continue;
                }

                let intensity = 1.0 / (dist_sq + 1.0);
                let cell = &mut self.cells[i];
                if cell.is_blank() || cell.intensity < intensity {
                    *cell = Cell {
                        ch: glow_glyph(intensity),
                        depth: depth + GLOW_DEPTH_OFFSET,
                        color,
                        intensity,
                    };
                }
            }
        }
    }

    /// Depth-tested text, one character per cell, clipped at the right edge.
    pub fn put_str(&mut self, x: i32, y: i32, text: &str, depth: f32, color: Option<Color>) {
        for (offset, ch) in text.chars().enumerate() {
            let cx = x.saturating_add(i32::try_from(offset).unwrap_or(i32::MAX));
            if cx >= i32::from(self.width) {
                break;
            }
            self.set(cx, y, ch, depth, color);
        }
    }

    /// Plain glyph rows without any color codes.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = usize::from(self.width).max(1);
        self.cells.chunks(width).map(|row| row.iter().map(|cell| cell.ch).collect())
    }
}

fn glow_glyph(intensity: f32) -> char {
    let levels = GLOW_RAMP.len();
    let index = ((1.0 - intensity) * levels as f32) as usize;
    GLOW_RAMP[index.min(levels - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Option<Color> = Some(Color::rgb(255, 0, 0));
    const BLUE: Option<Color> = Some(Color::rgb(0, 0, 255));

    #[test]
    fn depth_test_is_order_independent() {
        let mut a = Surface::new(4, 2);
        a.set(1, 1, 'A', 2.0, RED);
        a.set(1, 1, 'B', 1.0, BLUE);

        let mut b = Surface::new(4, 2);
        b.set(1, 1, 'B', 1.0, BLUE);
        b.set(1, 1, 'A', 2.0, RED);

        assert_eq!(a.get(1, 1), b.get(1, 1));
        assert_eq!(a.get(1, 1).unwrap().ch, 'B');
    }

    #[test]
    fn equal_depth_is_rejected() {
        let mut surface = Surface::new(2, 2);
        assert!(surface.set(0, 0, 'A', 1.0, None));
        assert!(!surface.set(0, 0, 'B', 1.0, None));
        assert_eq!(surface.get(0, 0).unwrap().ch, 'A');
    }

    #[test]
    fn out_of_bounds_is_a_no_op() {
        let mut surface = Surface::new(3, 3);
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MAX, i32::MIN)] {
            assert!(!surface.set(x, y, '#', 0.0, RED));
        }
        assert!(surface.cells().iter().all(|cell| *cell == Cell::EMPTY));
    }

    #[test]
    fn glow_ramp_by_distance() {
        let mut surface = Surface::new(7, 7);
        surface.set_with_glow(3, 3, '*', 0.0, RED, 2);

        let center = surface.get(3, 3).unwrap();
        assert_eq!((center.ch, center.intensity), ('*', 1.0));

        let edge = surface.get(4, 3).unwrap();
        assert_eq!(edge.ch, ':');
        assert_eq!(edge.intensity, 0.5);
        assert!((edge.depth - 0.1).abs() < 1e-6);
        assert_eq!(edge.color, RED);

        assert!((surface.get(4, 4).unwrap().intensity - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(surface.get(5, 3).unwrap().ch, '·');
        // sqrt(5) > 2
        assert!(surface.get(5, 4).unwrap().is_blank());
    }

    #[test]
    fn glow_never_downgrades_brighter_neighbor() {
        let mut surface = Surface::new(5, 5);
        surface.set(3, 2, '#', 5.0, BLUE);
        surface.set_with_glow(2, 2, '*', 0.0, RED, 1);

        let neighbor = surface.get(3, 2).unwrap();
        assert_eq!(neighbor.ch, '#');
        assert_eq!(neighbor.color, BLUE);
    }

    #[test]
    fn glow_replaces_weaker_halo_regardless_of_depth() {
        let mut surface = Surface::new(5, 1);
        // Diagonal-free row: (2,0) receives 0.2 from a source two cells away.
        surface.set_with_glow(0, 0, '*', -10.0, RED, 2);
        assert_eq!(surface.get(2, 0).unwrap().intensity, 0.2);

        surface.set_with_glow(3, 0, '*', 50.0, BLUE, 1);
        let cell = surface.get(2, 0).unwrap();
        assert_eq!(cell.intensity, 0.5);
        assert_eq!(cell.color, BLUE);
    }

    #[test]
    fn put_str_clips() {
        let mut surface = Surface::new(4, 1);
        surface.put_str(1, 0, "hello", 0.0, None);
        assert_eq!(surface.rows().collect::<Vec<_>>(), vec![" hel".to_string()]);
    }

    #[test]
    fn overwrite_ignores_depth() {
        let mut surface = Surface::new(1, 1);
        surface.set(0, 0, 'A', -5.0, None);
        assert!(surface.overwrite(0, 0, 'B', 1.0, None));
        assert_eq!(surface.get(0, 0).unwrap().depth, 1.0);
        assert!(!surface.overwrite(1, 0, 'C', 1.0, None));
    }

    #[test]
    fn overwrite_keeps_intensity() {
        let mut surface = Surface::new(3, 1);
        surface.overwrite(1, 0, 'B', 1.0, RED);
        assert_eq!(surface.get(1, 0).unwrap().intensity, 0.0);

        surface.set(2, 0, 'A', 5.0, None);
        surface.overwrite(2, 0, 'B', 1.0, RED);
        assert_eq!(surface.get(2, 0).unwrap().intensity, 1.0);
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut surface = Surface::new(6, 4);
        surface.set_with_glow(2, 2, '*', 0.0, RED, 2);
        surface.put_str(0, 0, "text", -1.0, BLUE);
        surface.overwrite(5, 3, '#', 1.0, None);
        assert!(surface.cells().iter().any(|cell| *cell != Cell::EMPTY));

        surface.clear();
        assert!(surface.cells().iter().all(|cell| *cell == Cell::EMPTY));
        assert!(surface.set(2, 2, 'x', 100.0, None));
    }

    #[test]
    fn extreme_arguments_do_not_overflow() {
        let mut surface = Surface::new(4, 3);
        surface.set_with_glow(1, 1, '*', 0.0, RED, i32::MAX);
        assert_eq!(surface.get(1, 1).unwrap().ch, '*');
        assert!(surface.cells().iter().all(|cell| !cell.is_blank()));

        surface.set_with_glow(i32::MIN, i32::MAX, '*', 0.0, RED, i32::MAX);
        surface.put_str(i32::MAX - 1, 0, "overflow", -1.0, None);
        surface.put_str(i32::MIN, 0, "underflow", -1.0, None);
        assert_eq!(surface.get(0, 0).unwrap().depth, 0.1);
    }
}
