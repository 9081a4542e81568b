#![no_std]

//! Text-mode driver for the 128x64 SSD1306 OLED on the shield.
//!
//! The panel is used in page addressing mode: eight pages of eight pixel rows
//! each, with a column cursor ("segment") inside the current page. Characters
//! are six columns wide, five of glyph plus one of spacing.

mod fonts;

use core::fmt;

use defmt::warn;
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;

pub use fonts::GLYPH_WIDTH;

pub const WIDTH: u8 = 128;
pub const PAGES: u8 = 8;
/// Columns taken by one character, spacing included.
pub const CHAR_WIDTH: u8 = GLYPH_WIDTH as u8 + 1;

const ADDRESS: u8 = 0x3C;
const COMMAND: u8 = 0x00;
const DATA: u8 = 0x40;

const INIT: [u8; 26] = [
    COMMAND,
    0xAE, // display off
    0xD5, 0x80, // clock divide
    0xA8, 0x3F, // multiplex 64
    0xD3, 0x00, // no offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x02, // page addressing
    0xA1, // segment remap
    0xC8, // scan from COM63
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // precharge
    0xDB, 0x40, // vcomh
    0xA4, // follow RAM
    0xA6, // not inverted
    0xAF, // display on
];

pub struct Oled<'d> {
    i2c: I2c<'d, Blocking>,
    page: u8,
    seg: u8,
}

impl<'d> Oled<'d> {
    /// Initialises the panel and blanks it.
    pub fn new(i2c: I2c<'d, Blocking>) -> Self {
        let mut oled = Self { i2c, page: 0, seg: 0 };
        oled.send(&INIT);
        oled.clear();
        oled
    }

    pub fn set_cursor(&mut self, page: u8, seg: u8) {
        self.page = page % PAGES;
        self.seg = seg.min(WIDTH - 1);
        self.send(&[COMMAND, 0xB0 | self.page, self.seg & 0x0F, 0x10 | (self.seg >> 4)]);
    }

    pub fn clear(&mut self) {
        for page in 0..PAGES {
            self.clear_region(page, 0, WIDTH);
        }
        self.set_cursor(0, 0);
    }

    /// Blanks `width` columns of `page` starting at `seg`, clipped to the
    /// panel edge. Leaves the cursor at `seg`.
    pub fn clear_region(&mut self, page: u8, seg: u8, width: u8) {
        self.set_cursor(page, seg);
        let mut left = width.min(WIDTH - self.seg) as usize;
        let mut chunk = [0u8; 17];
        chunk[0] = DATA;
        while left > 0 {
            let n = left.min(chunk.len() - 1);
            self.send(&chunk[..=n]);
            left -= n;
        }
        self.set_cursor(page, seg);
    }

    pub fn print_char(&mut self, character: char) {
        if character == '\n' {
            self.set_cursor(self.page + 1, 0);
            return;
        }
        self.columns(fonts::glyph(character));
    }

    pub fn print(&mut self, text: &str) {
        for c in text.chars() {
            self.print_char(c);
        }
    }

    /// Draws the glyph for `digit % 10`.
    pub fn print_digit(&mut self, digit: u8) {
        self.columns(fonts::DIGITS[usize::from(digit % 10)]);
    }

    fn columns(&mut self, glyph: [u8; GLYPH_WIDTH]) {
        if self.seg > WIDTH - CHAR_WIDTH {
            self.set_cursor(self.page + 1, 0);
        }
        let mut frame = [0u8; GLYPH_WIDTH + 2];
        frame[0] = DATA;
        frame[1..=GLYPH_WIDTH].copy_from_slice(&glyph);
        self.send(&frame);
        self.seg += CHAR_WIDTH;
    }

    fn send(&mut self, bytes: &[u8]) {
        if let Err(e) = self.i2c.blocking_write(ADDRESS, bytes) {
            warn!("oled write failed: {}", e);
        }
    }
}

impl fmt::Write for Oled<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s);
        Ok(())
    }
}
