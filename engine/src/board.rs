//! Collaborator interface to the shield hardware.

use core::fmt;

use embassy_time::Duration;

use crate::input::Lane;

/// Number of LEDs on the shield ring.
pub const LED_COUNT: u8 = 8;

/// One LED of the ring, `0..LED_COUNT`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Led(pub u8);

impl Led {
    pub fn all() -> impl Iterator<Item = Led> {
        (0..LED_COUNT).map(Led)
    }
}

/// A digital input line on the shield.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// DIP switch `0..8`, switch 1 is bit 0 of the switch vector.
    Dip(u8),
    /// Navigation pad direction. Active low.
    Nav(Lane),
    RotaryA,
    RotaryB,
}

/// Everything the engine needs from the board.
///
/// Reads are assumed to always succeed. Display calls only report state and
/// never feed back into game logic.
#[allow(async_fn_in_trait)]
pub trait Board {
    /// One noisy bit sampled from a floating analog input.
    fn read_noise_bit(&mut self) -> bool;

    /// Instantaneous level of a digital input.
    fn read_digital(&mut self, channel: Channel) -> bool;

    /// Raw 16-bit potentiometer conversion.
    fn read_potentiometer(&mut self) -> u16;

    fn write_indicator(&mut self, led: Led, on: bool);

    /// Hold for a fixed duration. Not cancellable.
    async fn wait(&mut self, duration: Duration);

    fn clear_screen(&mut self);

    /// Blank `width` columns starting at the cursor.
    fn clear_region(&mut self, page: u8, seg: u8, width: u8);

    fn set_cursor(&mut self, page: u8, seg: u8);

    fn render_text(&mut self, text: &str);

    /// Draw a single decimal digit glyph at the cursor.
    fn render_digit_glyph(&mut self, digit: u8);

    /// Generic formatted output at the cursor.
    fn render_fmt(&mut self, args: fmt::Arguments<'_>);

    /// Switch every LED of the ring off.
    fn reset_indicators(&mut self) {
        for led in Led::all() {
            self.write_indicator(led, false);
        }
    }
}
