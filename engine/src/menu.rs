//! Menu dispatcher routing button flags to games and LED effects.
//!
//! The dispatcher is the only consumer of the button flags while a menu is on
//! screen; once a feature starts it hands the flags it needs to that feature
//! and takes them back when the feature returns.

use embassy_futures::yield_now;

use crate::board::Board;
use crate::flags::EventFlags;
use crate::games::{run_guess_number, run_sequence_memory, Outcome};
use crate::leds::{run_encoder_leds, run_led_chase};
use crate::prng::Prng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Main,
    Games,
    Leds,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Game {
    GuessNumber,
    SequenceMemory,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    Chase,
    Encoder,
}

/// What a single poll of the dispatcher did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Activity {
    Opened(Screen),
    Played(Game, Outcome),
    Ran(Effect),
    Back,
    /// A press with no feature behind it was consumed.
    Drained,
}

pub struct Menu<'a, B: Board> {
    board: B,
    flags: &'a EventFlags,
    prng: Prng,
    screen: Screen,
}

impl<'a, B: Board> Menu<'a, B> {
    /// Takes ownership of the board and draws the main menu.
    pub fn new(board: B, flags: &'a EventFlags, prng: Prng) -> Self {
        let mut menu = Self { board, flags, prng, screen: Screen::Main };
        menu.draw();
        menu
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub async fn run(mut self) -> ! {
        loop {
            if let Some(activity) = self.poll().await {
                debug!("menu: {}", activity);
            }
            yield_now().await;
        }
    }

    /// One pass over the flags of the current screen. Runs a whole feature
    /// when one is selected.
    pub async fn poll(&mut self) -> Option<Activity> {
        let flags = self.flags;
        match self.screen {
            Screen::Main => {
                if flags.sw1.take() || flags.sw2.take() {
                    warn!("monitoring screens are not available");
                    return Some(Activity::Drained);
                }
                if flags.exit.take() {
                    return Some(Activity::Drained);
                }
                if flags.sw3.take() {
                    return Some(self.open(Screen::Games));
                }
                if flags.sw4.take() {
                    return Some(self.open(Screen::Leds));
                }
                None
            }
            Screen::Games => {
                if flags.exit.take() {
                    return Some(self.open_back());
                }
                let activity = if flags.sw1.take() {
                    let outcome = run_guess_number(&mut self.board, &mut self.prng, &flags.exit).await;
                    Activity::Played(Game::GuessNumber, outcome)
                } else if flags.sw2.take() {
                    let outcome = run_sequence_memory(&mut self.board, &mut self.prng).await;
                    Activity::Played(Game::SequenceMemory, outcome)
                } else {
                    return None;
                };
                self.draw();
                Some(activity)
            }
            Screen::Leds => {
                if flags.exit.take() {
                    return Some(self.open_back());
                }
                let activity = if flags.sw1.take() {
                    run_led_chase(&mut self.board, flags).await;
                    Activity::Ran(Effect::Chase)
                } else if flags.sw2.take() {
                    run_encoder_leds(&mut self.board, flags).await;
                    Activity::Ran(Effect::Encoder)
                } else {
                    return None;
                };
                self.draw();
                Some(activity)
            }
        }
    }

    fn open(&mut self, screen: Screen) -> Activity {
        self.screen = screen;
        self.draw();
        Activity::Opened(screen)
    }

    fn open_back(&mut self) -> Activity {
        self.open(Screen::Main);
        Activity::Back
    }

    fn draw(&mut self) {
        let lines: [&str; 3] = match self.screen {
            Screen::Main => ["MAIN MENU", "SW3: GAMES", "SW4: LEDS"],
            Screen::Games => ["CHOOSE A GAME:", "1. GUESS THE NUMBER", "2. SEQUENCE"],
            Screen::Leds => ["LED EFFECTS:", "1. CHASE", "2. ENCODER"],
        };
        self.board.clear_screen();
        for (page, line) in lines.iter().enumerate() {
            self.board.set_cursor(page as u8, 0);
            self.board.render_text(line);
        }
    }
}
