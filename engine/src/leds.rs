//! LED ring effects: a potentiometer-paced chase and an encoder-driven bar.
//!
//! Both run until `exit` is consumed at the top of a loop iteration; a hold in
//! progress always completes first.

use embassy_futures::yield_now;
use embassy_time::Duration;

use crate::board::{Board, Channel, Led, LED_COUNT};
use crate::digits::render_number;
use crate::flags::EventFlags;
use crate::input::{Quadrature, Rotation};
use crate::timing::CHASE_INITIAL_PERIOD;

/// Reading change needed before the shown period is refreshed.
const POT_REDRAW_THRESHOLD: u16 = 100;
/// Readings at or below the floor are clamped to `POT_MIN`.
const POT_FLOOR: u16 = 100;
const POT_MIN: u16 = 50;

pub(crate) const VALUE_PAGE: u8 = 0;
pub(crate) const CHASE_VALUE_SEG: u8 = 57;
pub(crate) const ENCODER_VALUE_SEG: u8 = 25;
const VALUE_WIDTH: u8 = 36;

/// Chase period for a 13-bit potentiometer reading: `reading << 12` ns.
pub fn chase_period(reading: u16) -> Duration {
    let reading = if reading <= POT_FLOOR { POT_MIN } else { reading };
    Duration::from_micros((u64::from(reading) << 12) / 1000)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    fn step(self, index: u8) -> u8 {
        match self {
            Direction::Clockwise => (index + 1) % LED_COUNT,
            Direction::CounterClockwise => index.checked_sub(1).unwrap_or(LED_COUNT - 1),
        }
    }
}

/// Walks a single lit LED around the ring. `sw2` reverses the direction and
/// the potentiometer sets the pace.
pub async fn run_led_chase<B: Board>(board: &mut B, flags: &EventFlags) {
    board.clear_screen();
    board.set_cursor(VALUE_PAGE, 0);
    board.render_text("SPEED:");

    let mut period = CHASE_INITIAL_PERIOD;
    let mut shown: u16 = 0;
    let mut previous: u8 = 0;
    let mut current: u8 = 0;
    let mut direction = Direction::Clockwise;

    loop {
        if flags.exit.take() {
            break;
        }
        if flags.sw2.take() {
            direction = direction.flipped();
            debug!("chase direction: {}", direction);
        }

        board.wait(period).await;

        let reading = board.read_potentiometer() >> 3;
        if reading.abs_diff(shown) >= POT_REDRAW_THRESHOLD {
            board.clear_region(VALUE_PAGE, CHASE_VALUE_SEG, VALUE_WIDTH);
            board.set_cursor(VALUE_PAGE, CHASE_VALUE_SEG);
            render_number(board, chase_period(reading).as_micros() as u32);
            shown = reading;
        }
        period = chase_period(reading);

        board.write_indicator(Led(previous), false);
        board.write_indicator(Led(current), true);
        previous = current;
        current = direction.step(current);
    }

    board.reset_indicators();
    board.clear_screen();
}

/// Lights LEDs `0..=n` where `n` follows the rotary encoder, wrapping at the
/// ends of the ring.
pub async fn run_encoder_leds<B: Board>(board: &mut B, flags: &EventFlags) {
    board.clear_screen();
    board.set_cursor(VALUE_PAGE, 0);
    board.render_text("LEDS");

    let mut decoder = Quadrature::new(board.read_digital(Channel::RotaryB));
    let mut counter: u8 = 0;

    loop {
        if flags.exit.take() {
            break;
        }
        let a = board.read_digital(Channel::RotaryA);
        let b = board.read_digital(Channel::RotaryB);
        let Some(rotation) = decoder.update(a, b) else {
            yield_now().await;
            continue;
        };

        counter = match rotation {
            Rotation::Clockwise => Direction::Clockwise.step(counter),
            Rotation::CounterClockwise => Direction::CounterClockwise.step(counter),
        };
        trace!("encoder {} -> {=u8}", rotation, counter);

        board.clear_region(VALUE_PAGE, ENCODER_VALUE_SEG, 6);
        board.set_cursor(VALUE_PAGE, ENCODER_VALUE_SEG);
        board.render_digit_glyph(counter);

        board.reset_indicators();
        for led in 0..=counter {
            board.write_indicator(Led(led), true);
        }
    }

    board.reset_indicators();
    board.clear_screen();
}
