//! The two shield games. Each entry point runs one full session and returns
//! only once it reaches a terminal outcome.

mod guess;
mod sequence;

pub use guess::{run_guess_number, GuessSession};
pub use sequence::{run_sequence_memory, LanePattern, SequenceSession, StepSet, LIVES, STEPS};

use crate::board::Board;

/// Terminal result of a game session. Losing is a normal outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Win,
    Lose,
}

fn show_at<B: Board>(board: &mut B, page: u8, seg: u8, text: &str) {
    board.set_cursor(page, seg);
    board.render_text(text);
}
