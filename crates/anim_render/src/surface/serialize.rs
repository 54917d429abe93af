//! Escape-coded text form of a surface.
//!
//! Each row is emitted left to right. A color code is written only when the
//! color changes along the row, and a reset closes the row if a color is still
//! open. Rows are separated by `\n`.

use std::fmt::Write as _;

use vte::{Params, Parser, Perform};

use super::buffer::Surface;
use super::cell::{Color, RESET};
use crate::RenderError;

impl Surface {
    pub fn serialize(&self) -> String {
        // Rough guess: a glyph plus the odd color code per cell.
        let mut out = String::with_capacity(self.cells().len() * 4 + usize::from(self.height()));
        let width = usize::from(self.width()).max(1);

        for (y, row) in self.cells().chunks(width).enumerate() {
            if y > 0 {
                out.push('\n');
            }

            let mut current: Option<Color> = None;
            for cell in row {
                if cell.color != current {
                    match cell.color {
                        Some(color) => {
                            let _ = write!(out, "{color}");
                        },
                        None => out.push_str(RESET),
                    }
                    current = cell.color;
                }
                out.push(cell.ch);
            }

            if current.is_some() {
                out.push_str(RESET);
            }
        }

        out
    }
}

/// Glyph and color grid recovered from serialized text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecodedFrame {
    pub rows: Vec<Vec<(char, Option<Color>)>>,
}

impl DecodedFrame {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Parse the output of [`Surface::serialize`].
///
/// Understands `ESC[0m`, `ESC[38;2;r;g;bm` and single-parameter SGR codes.
/// Any other escape or control sequence is rejected.
pub fn decode(text: &str) -> Result<DecodedFrame, RenderError> {
    let mut decoder = FrameDecoder::default();
    let mut parser = Parser::new();
    parser.advance(&mut decoder, text.as_bytes());

    if let Some(err) = decoder.error {
        return Err(err);
    }

    // Every ESC must have been closed by a dispatch.
    let escapes = text.matches('\x1b').count();
    if escapes != decoder.dispatched {
        return Err(RenderError::Decode {
            line: decoder.rows.len(),
            reason: "unterminated escape sequence".into(),
        });
    }

    decoder.rows.push(decoder.row);
    Ok(DecodedFrame { rows: decoder.rows })
}

#[derive(Default)]
struct FrameDecoder {
    rows: Vec<Vec<(char, Option<Color>)>>,
    row: Vec<(char, Option<Color>)>,
    current: Option<Color>,
    dispatched: usize,
    error: Option<RenderError>,
}

impl FrameDecoder {
    fn fail(&mut self, reason: String) {
        if self.error.is_none() {
            self.error = Some(RenderError::Decode { line: self.rows.len(), reason });
        }
    }
}

impl Perform for FrameDecoder {
    fn print(&mut self, c: char) {
        self.row.push((c, self.current));
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            b'\n' => {
                self.rows.push(std::mem::take(&mut self.row));
                self.current = None;
            },
            _ => self.fail(format!("unexpected control byte {byte:#04x}")),
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        self.dispatched += 1;
        if action != 'm' || !intermediates.is_empty() || ignore {
            self.fail(format!("unsupported CSI sequence ending in {action:?}"));
            return;
        }

        let values: Vec<u16> = params.iter().flatten().copied().collect();
        match sgr_color(&values) {
            Some(color) => self.current = color,
            None => self.fail(format!("unsupported SGR parameters {values:?}")),
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, byte: u8) {
        self.dispatched += 1;
        self.fail(format!("unsupported escape {:?}", char::from(byte)));
    }
}

/// `Some(None)` for a reset, `Some(Some(color))` for a foreground color.
fn sgr_color(values: &[u16]) -> Option<Option<Color>> {
    let byte = |v: u16| u8::try_from(v).ok();
    match *values {
        [] | [0] => Some(None),
        [38, 2, r, g, b] => Some(Some(Color::Rgb([byte(r)?, byte(g)?, byte(b)?]))),
        [code] => Some(Some(Color::Sgr(byte(code)?))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const GREEN: Color = Color::rgb(0, 255, 0);

    #[test]
    fn uncolored_surface_is_plain_text() {
        let mut surface = Surface::new(3, 2);
        surface.set(1, 0, 'x', 0.0, None);
        assert_eq!(surface.serialize(), " x \n   ");
    }

    #[test]
    fn one_code_per_color_run() {
        let mut surface = Surface::new(5, 1);
        surface.set(0, 0, 'a', 0.0, Some(RED));
        surface.set(1, 0, 'b', 0.0, Some(RED));
        surface.set(2, 0, 'c', 0.0, Some(GREEN));
        surface.set(4, 0, 'e', 0.0, Some(GREEN));

        let expected = format!("{RED}ab{GREEN}c{RESET} {GREEN}e{RESET}");
        assert_eq!(surface.serialize(), expected);
    }

    #[test]
    fn reset_only_when_row_ends_colored() {
        let mut surface = Surface::new(2, 2);
        surface.set(0, 0, 'a', 0.0, Some(RED));
        surface.set(1, 1, 'b', 0.0, Some(RED));

        let expected = format!("{RED}a{RESET} \n {RED}b{RESET}");
        assert_eq!(surface.serialize(), expected);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("ab\x1b[38;2;1m").is_err());
        assert!(decode("\x1b[12").is_err());
        assert!(decode("\x1bx").is_err());
        assert!(decode("\x1b[3x4m").is_err());
    }

    #[test]
    fn decode_rejects_other_sequences() {
        assert!(decode("a\tb").is_err());
        assert!(decode("a\r\nb").is_err());
        assert!(decode("\x1b[2J").is_err());
        assert!(decode("\x1b[300m").is_err());

        let err = decode("ok\nok\n\x1b[1;2H").unwrap_err();
        assert!(matches!(err, RenderError::Decode { line: 2, .. }));
    }

    #[test]
    fn decode_keeps_wide_glyphs_and_row_colors() {
        let mut surface = Surface::new(3, 2);
        surface.set(0, 0, '\u{28FF}', 0.0, Some(RED));
        surface.set(1, 0, '▀', 0.0, Some(RED));
        surface.set(2, 1, '·', 0.0, Some(Color::BRIGHT_CYAN));

        let frame = decode(&surface.serialize()).unwrap();
        assert_eq!(frame.rows[0], vec![('\u{28FF}', Some(RED)), ('▀', Some(RED)), (' ', None)]);
        assert_eq!(frame.rows[1][2], ('·', Some(Color::BRIGHT_CYAN)));
        assert_eq!(frame.rows[1][0], (' ', None));
    }

    #[test]
    fn decode_sgr_codes() {
        let frame = decode("\x1b[97mA\x1b[0mB").unwrap();
        assert_eq!(frame.rows[0], vec![('A', Some(Color::BRIGHT_WHITE)), ('B', None)]);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
    }
}
