use embassy_futures::yield_now;

use super::{show_at, Outcome};
use crate::board::Board;
use crate::digits::render_number;
use crate::flags::Flag;
use crate::input::read_switches;
use crate::prng::Prng;
use crate::timing::{CHECKING_HOLD, GUESS_RESULT_HOLD};

/// Draw size for the target. A modulo-255 draw never yields 255, while the
/// switches can still express it.
const TARGET_RANGE: u8 = 255;

pub(crate) const INPUT_PAGE: u8 = 0;
pub(crate) const INPUT_SEG: u8 = 85;
pub(crate) const TARGET_PAGE: u8 = 2;
pub(crate) const TARGET_SEG: u8 = 93;

/// One round of Guess-The-Number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GuessSession {
    pub target: u8,
    pub captured_input: u8,
}

impl GuessSession {
    pub fn outcome(&self) -> Outcome {
        if self.captured_input == self.target {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

enum State {
    Setup,
    AwaitingInput { target: u8 },
    Evaluating(GuessSession),
    ShowingResult(GuessSession),
    Done(Outcome),
}

/// Plays one round: the player sets the DIP switches to the hidden number and
/// confirms. `confirm` is consumed exactly once.
pub async fn run_guess_number<B: Board>(board: &mut B, prng: &mut Prng, confirm: &Flag) -> Outcome {
    let mut state = State::Setup;
    loop {
        state = match state {
            State::Setup => {
                prng.advance();
                let target = prng.draw(TARGET_RANGE);
                debug!("guess target drawn: {=u8}", target);
                board.clear_screen();
                show_at(board, 3, 10, "SET SWITCHES+EXIT");
                State::AwaitingInput { target }
            }
            State::AwaitingInput { target } => {
                let captured_input = capture_switches(board, confirm).await;
                State::Evaluating(GuessSession { target, captured_input })
            }
            State::Evaluating(session) => {
                board.clear_screen();
                show_at(board, 3, 33, "CHECKING");
                board.wait(CHECKING_HOLD).await;
                State::ShowingResult(session)
            }
            State::ShowingResult(session) => {
                let outcome = session.outcome();
                show_result(board, &session, outcome);
                State::Done(outcome)
            }
            State::Done(outcome) => {
                board.wait(GUESS_RESULT_HOLD).await;
                info!("guess the number finished: {}", outcome);
                return outcome;
            }
        }
    }
}

/// Samples the switches until the confirm flag shows up, returning the last
/// sample. Always samples at least once.
async fn capture_switches<B: Board>(board: &mut B, confirm: &Flag) -> u8 {
    loop {
        let value = read_switches(board);
        if confirm.take() {
            return value;
        }
        yield_now().await;
    }
}

fn show_result<B: Board>(board: &mut B, session: &GuessSession, outcome: Outcome) {
    board.clear_screen();
    match outcome {
        Outcome::Win => show_at(board, 0, 0, "YOU WIN"),
        Outcome::Lose => {
            show_at(board, INPUT_PAGE, 0, "YOU LOSE:");
            board.set_cursor(INPUT_PAGE, INPUT_SEG);
            render_number(board, u32::from(session.captured_input));

            show_at(board, TARGET_PAGE, 0, "CORRECT WAS:");
            board.set_cursor(TARGET_PAGE, TARGET_SEG);
            board.render_fmt(format_args!("{}", session.target));
        }
    }
}
