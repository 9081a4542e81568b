#![no_std]

//! The physical shield behind [`engine::Board`].

use core::fmt::{self, Write as _};

use defmt::trace;
use display::Oled;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Timer};
use engine::{Board, Channel, Led};

/// Every peripheral the engine touches, already configured.
///
/// The button lines that raise event flags are not here: they belong to the
/// interrupt tasks.
pub struct ShieldBoard<'d> {
    /// Ring LEDs in ring order, active high.
    pub leds: [Output<'d>; 8],
    /// DIP switches, switch 1 first.
    pub switches: [Input<'d>; 8],
    /// Navigation pad as Left, Right, Up, Down.
    pub nav: [Input<'d>; 4],
    pub rotary_a: Input<'d>,
    pub rotary_b: Input<'d>,
    pub adc: Adc<'d, ADC1>,
    /// Floating input used as the entropy source.
    pub noise: AnyAdcChannel<ADC1>,
    pub pot: AnyAdcChannel<ADC1>,
    pub oled: Oled<'d>,
}

impl ShieldBoard<'_> {
    /// Conversion left-aligned to 16 bits.
    fn sample(&mut self, noise: bool) -> u16 {
        let channel = if noise { &mut self.noise } else { &mut self.pot };
        self.adc.blocking_read(channel) << 4
    }
}

impl Board for ShieldBoard<'_> {
    fn read_noise_bit(&mut self) -> bool {
        let sample = self.sample(true);
        trace!("noise sample {=u16:#06x}", sample);
        (sample >> 4) & 1 == 1
    }

    fn read_digital(&mut self, channel: Channel) -> bool {
        match channel {
            Channel::Dip(n) => self.switches[usize::from(n % 8)].is_high(),
            Channel::Nav(lane) => self.nav[lane.index()].is_high(),
            Channel::RotaryA => self.rotary_a.is_high(),
            Channel::RotaryB => self.rotary_b.is_high(),
        }
    }

    fn read_potentiometer(&mut self) -> u16 {
        self.sample(false)
    }

    fn write_indicator(&mut self, led: Led, on: bool) {
        if let Some(pin) = self.leds.get_mut(usize::from(led.0)) {
            pin.set_level(on.into());
        }
    }

    async fn wait(&mut self, duration: Duration) {
        Timer::after(duration).await;
    }

    fn clear_screen(&mut self) {
        self.oled.clear();
    }

    fn clear_region(&mut self, page: u8, seg: u8, width: u8) {
        self.oled.clear_region(page, seg, width);
    }

    fn set_cursor(&mut self, page: u8, seg: u8) {
        self.oled.set_cursor(page, seg);
    }

    fn render_text(&mut self, text: &str) {
        self.oled.print(text);
    }

    fn render_digit_glyph(&mut self, digit: u8) {
        self.oled.print_digit(digit);
    }

    fn render_fmt(&mut self, args: fmt::Arguments<'_>) {
        // Oled::write_str never fails
        let _ = self.oled.write_fmt(args);
    }
}
