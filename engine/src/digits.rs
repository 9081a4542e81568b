//! Decimal digit peeling, most-significant digit first.

use crate::board::Board;

/// Iterator over the decimal digits of a value.
///
/// Starts from the largest power of ten not above the value and peels one
/// digit per step. Zero yields a single `0`.
#[derive(Clone, Debug)]
pub struct Digits {
    value: u32,
    divisor: u32,
}

pub fn digits(value: u32) -> Digits {
    let mut divisor = 1;
    while value / divisor >= 10 {
        divisor *= 10;
    }
    Digits { value, divisor }
}

impl Iterator for Digits {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.divisor == 0 {
            return None;
        }
        let digit = (self.value / self.divisor) % 10;
        self.divisor /= 10;
        Some(digit as u8)
    }
}

/// Draws `value` as digit glyphs at the current cursor.
pub fn render_number<B: Board>(board: &mut B, value: u32) {
    for digit in digits(value) {
        board.render_digit_glyph(digit);
    }
}
