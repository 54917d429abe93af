//! Packing of sub-cell luminance into terminal glyphs.
//!
//! Block mode stacks two sub-rows per cell and picks one of four half-block
//! glyphs. Braille mode maps a 2x4 sub-pixel block onto the eight dots of a
//! Braille pattern.

use super::plane::Plane;
use crate::surface::cell::Color;
use crate::theme::gradient::Gradient;

pub const BLOCK_THRESHOLD: f32 = 0.15;
pub const BRAILLE_THRESHOLD: f32 = 0.3;

/// Indexed by block mask: blank, bottom only, top only, both.
pub const BLOCK_GLYPHS: [char; 4] = [' ', '▄', '▀', '█'];

pub const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for each sub-pixel, indexed `[row][column]`.
pub const BRAILLE_WEIGHTS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

/// One terminal cell produced by packing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedCell {
    pub ch: char,
    pub mask: u8,
    pub color: Option<Color>,
}

impl PackedCell {
    pub fn is_active(&self) -> bool {
        self.mask != 0
    }
}

/// `2` for a lit top half, `1` for a lit bottom half.
pub fn block_mask(top: f32, bottom: f32) -> u8 {
    (u8::from(top > BLOCK_THRESHOLD) << 1) | u8::from(bottom > BLOCK_THRESHOLD)
}

pub fn block_glyph(mask: u8) -> char {
    BLOCK_GLYPHS[usize::from(mask & 0b11)]
}

/// Sum of dot weights of every sub-pixel above the Braille threshold.
pub fn braille_mask(block: &[[f32; 2]; 4]) -> u8 {
    let mut mask = 0;
    for (row, weights) in block.iter().zip(BRAILLE_WEIGHTS.iter()) {
        for (&value, &weight) in row.iter().zip(weights) {
            if value > BRAILLE_THRESHOLD {
                mask |= weight;
            }
        }
    }
    mask
}

pub fn braille_glyph(mask: u8) -> char {
    // Every value in U+2800..=U+28FF is assigned.
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
}

/// Pack a `W x 2H` luminance plane into `W x H` half-block cells.
///
/// Colors come from `colors` when present (mean of the lit halves), otherwise
/// from the gradient entry for the lit halves' mean luminance.
pub fn pack_blocks(
    luminance: &Plane<f32>,
    colors: Option<&Plane<[f32; 3]>>,
    gradient: &Gradient,
) -> Plane<PackedCell> {
    let columns = luminance.width();
    let rows = luminance.height() / 2;

    Plane::from_fn(columns, rows, |x, y| {
        let (ty, by) = (y * 2, y * 2 + 1);
        let mask = block_mask(luminance.get(x, ty), luminance.get(x, by));

        let color = match colors {
            Some(rgb) => {
                let (top, bottom) = (rgb.get(x, ty), rgb.get(x, by));
                match mask {
                    3 => Some(Color::from_unit(mean_rgb(&[top, bottom]))),
                    2 => Some(Color::from_unit(top)),
                    1 => Some(Color::from_unit(bottom)),
                    _ => None,
                }
            },
            None => {
                let (top, bottom) = (luminance.get(x, ty), luminance.get(x, by));
                let intensity = match mask {
                    3 => (top + bottom) * 0.5,
                    2 => top,
                    1 => bottom,
                    _ => 0.0,
                };
                (mask != 0).then(|| gradient.color_for(intensity))
            },
        };

        PackedCell { ch: block_glyph(mask), mask, color }
    })
}

/// Pack a `2W x 4H` luminance plane into `W x H` Braille cells.
///
/// With a color plane the cell color is the mean of the active sub-pixels.
/// Without one it is the gradient entry for the mean luminance of all eight
/// sub-pixels, active or not.
pub fn pack_braille(
    luminance: &Plane<f32>,
    colors: Option<&Plane<[f32; 3]>>,
    gradient: &Gradient,
) -> Plane<PackedCell> {
    let columns = luminance.width() / 2;
    let rows = luminance.height() / 4;

    Plane::from_fn(columns, rows, |x, y| {
        let block = sub_block(luminance, x, y);
        let mask = braille_mask(&block);

        let color = match colors {
            Some(rgb) => {
                let active: Vec<[f32; 3]> = (0..4)
                    .flat_map(|row| (0..2).map(move |col| (row, col)))
                    .filter(|&(row, col)| mask & BRAILLE_WEIGHTS[row][col] != 0)
                    .map(|(row, col)| rgb.get(x * 2 + col, y * 4 + row))
                    .collect();
                (!active.is_empty()).then(|| Color::from_unit(mean_rgb(&active)))
            },
            None => {
                let mean = block.iter().flatten().sum::<f32>() / 8.0;
                Some(gradient.color_for(mean))
            },
        };

        PackedCell { ch: braille_glyph(mask), mask, color }
    })
}

fn sub_block(luminance: &Plane<f32>, x: usize, y: usize) -> [[f32; 2]; 4] {
    let mut block = [[0.0; 2]; 4];
    for (row, values) in block.iter_mut().enumerate() {
        for (col, value) in values.iter_mut().enumerate() {
            *value = luminance.get(x * 2 + col, y * 4 + row);
        }
    }
    block
}

fn mean_rgb(samples: &[[f32; 3]]) -> [f32; 3] {
    let n = samples.len().max(1) as f32;
    let mut sum = [0.0; 3];
    for sample in samples {
        for (acc, channel) in sum.iter_mut().zip(sample) {
            *acc += channel;
        }
    }
    sum.map(|c| c / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::palette::{Palette, Theme};

    fn gradient() -> Gradient {
        Palette::by_name("void").gradient().clone()
    }

    #[test]
    fn block_masks() {
        assert_eq!(block_mask(0.9, 0.05), 2);
        assert_eq!(block_glyph(2), '▀');
        assert_eq!(block_mask(0.05, 0.9), 1);
        assert_eq!(block_glyph(1), '▄');
        assert_eq!(block_mask(0.16, 0.16), 3);
        assert_eq!(block_glyph(3), '█');
        // threshold is strict
        assert_eq!(block_mask(0.15, 0.0), 0);
        assert_eq!(block_glyph(0), ' ');
    }

    #[test]
    fn braille_all_and_single_dot() {
        assert_eq!(braille_mask(&[[1.0; 2]; 4]), 0xFF);
        assert_eq!(braille_glyph(0xFF) as u32, 0x28FF);

        let mut block = [[0.0; 2]; 4];
        block[0][1] = 0.9;
        assert_eq!(braille_mask(&block), 0x08);

        block = [[0.3; 2]; 4];
        assert_eq!(braille_mask(&block), 0);
        assert_eq!(braille_glyph(0), '\u{2800}');
    }

    #[test]
    fn braille_weights_cover_every_bit_once() {
        let all = BRAILLE_WEIGHTS.iter().flatten().fold(0u16, |acc, &w| {
            assert_eq!(acc & u16::from(w), 0);
            acc | u16::from(w)
        });
        assert_eq!(all, 0xFF);
    }

    #[test]
    fn block_scalar_colors() {
        let gradient = gradient();
        let luminance = Plane::new(3, 2, vec![0.9, 0.05, 1.0, 0.05, 0.0, 0.5]);
        let packed = pack_blocks(&luminance, None, &gradient);

        assert_eq!(packed.dims(), (3, 1));
        let top_only = packed.get(0, 0);
        assert_eq!((top_only.ch, top_only.mask), ('▀', 2));
        assert_eq!(top_only.color, Some(gradient.color_for(0.9)));

        assert_eq!(packed.get(1, 0).ch, ' ');
        assert_eq!(packed.get(1, 0).color, None);

        let both = packed.get(2, 0);
        assert_eq!(both.ch, '█');
        assert_eq!(both.color, Some(gradient.color_for(0.75)));
    }

    #[test]
    fn block_rgb_colors_average_both_halves() {
        let luminance = Plane::new(1, 2, vec![0.9, 0.9]);
        let rgb = Plane::new(1, 2, vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let packed = pack_blocks(&luminance, Some(&rgb), &gradient());
        assert_eq!(packed.get(0, 0).color, Some(Color::rgb(127, 0, 127)));
    }

    #[test]
    fn braille_rgb_uses_active_sub_pixels_only() {
        let mut lum = vec![0.0; 8];
        lum[0] = 1.0; // row 0, col 0
        let luminance = Plane::new(2, 4, lum);
        let mut rgb = vec![[0.0, 0.0, 1.0]; 8];
        rgb[0] = [1.0, 0.0, 0.0];
        let rgb = Plane::new(2, 4, rgb);

        let cell = pack_braille(&luminance, Some(&rgb), &gradient()).get(0, 0);
        assert_eq!(cell.mask, 0x01);
        assert_eq!(cell.color, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn braille_scalar_averages_all_sub_pixels() {
        let gradient = gradient();
        let mut lum = vec![0.0; 8];
        lum[7] = 0.8; // row 3, col 1
        let luminance = Plane::new(2, 4, lum);

        let cell = pack_braille(&luminance, None, &gradient).get(0, 0);
        assert_eq!(cell.mask, 0x80);
        assert_eq!(cell.color, Some(gradient.color_for(0.1)));
        assert_eq!(cell.color, Some(gradient.color_at(0)));
    }
}
