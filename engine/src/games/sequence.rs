use embassy_futures::yield_now;

use super::{show_at, Outcome};
use crate::board::Board;
use crate::digits::render_number;
use crate::input::{Lane, NavEdge, NavEdges, NavState};
use crate::prng::Prng;
use crate::timing::{SEQUENCE_RESULT_HOLD, STEP_GAP, STEP_HOLD};

/// Length of the shown sequence and of each attempt.
pub const STEPS: u8 = 6;
/// Attempts allowed against the same sequence.
pub const LIVES: u8 = 3;

pub(crate) const LIVES_PAGE: u8 = 3;
pub(crate) const LIVES_SEG: u8 = 82;
const LIVES_WIDTH: u8 = 6;

/// Set of step positions, bit `n` for step `n`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepSet(u8);

impl StepSet {
    pub fn insert(&mut self, step: u8) {
        debug_assert!(step < STEPS);
        self.0 |= 1 << step;
    }

    pub fn contains(self, step: u8) -> bool {
        self.0 & (1 << step) != 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Which steps each lane was active at. Two patterns are equal only when
/// every lane holds exactly the same step positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LanePattern {
    lanes: [StepSet; 4],
}

impl LanePattern {
    pub fn from_lanes(sequence: &[Lane]) -> Self {
        let mut pattern = Self::default();
        for (step, &lane) in sequence.iter().enumerate() {
            pattern.record(lane, step as u8);
        }
        pattern
    }

    pub fn record(&mut self, lane: Lane, step: u8) {
        self.lanes[lane.index()].insert(step);
    }

    pub fn lane(&self, lane: Lane) -> StepSet {
        self.lanes[lane.index()]
    }

    pub fn clear(&mut self) {
        self.lanes = [StepSet::default(); 4];
    }
}

/// State of one Sequence-Memory game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceSession {
    pub target_sequence: LanePattern,
    pub captured_sequence: LanePattern,
    pub lives: u8,
    cursor: u8,
}

impl SequenceSession {
    pub fn new(target_sequence: LanePattern) -> Self {
        Self {
            target_sequence,
            captured_sequence: LanePattern::default(),
            lives: LIVES,
            cursor: 0,
        }
    }

    pub fn attempt_complete(&self) -> bool {
        self.cursor >= STEPS
    }

    pub fn record_press(&mut self, lane: Lane) {
        self.captured_sequence.record(lane, self.cursor);
        self.cursor += 1;
    }

    pub fn matches(&self) -> bool {
        self.captured_sequence == self.target_sequence
    }

    /// Spend a life and reset the attempt. Returns the lives left.
    pub fn fail_attempt(&mut self) -> u8 {
        self.lives -= 1;
        self.captured_sequence.clear();
        self.cursor = 0;
        self.lives
    }
}

enum Phase {
    Presenting,
    InputCapture(NavEdges),
    Verification(NavEdges),
    Finished(Outcome),
}

/// Shows a random six-step LED sequence and lets the player repeat it on the
/// navigation pad, with three attempts at the same sequence.
pub async fn run_sequence_memory<B: Board>(board: &mut B, prng: &mut Prng) -> Outcome {
    board.clear_screen();
    let mut session = SequenceSession::new(LanePattern::default());
    let mut phase = Phase::Presenting;
    loop {
        phase = match phase {
            Phase::Presenting => {
                session = SequenceSession::new(present(board, prng).await);
                let edges = NavEdges::new(NavState::sample(board));
                show_at(board, LIVES_PAGE, 43, "LIVES:");
                show_lives(board, session.lives);
                Phase::InputCapture(edges)
            }
            Phase::InputCapture(mut edges) => {
                capture_attempt(board, &mut edges, &mut session).await;
                Phase::Verification(edges)
            }
            Phase::Verification(edges) => {
                board.reset_indicators();
                if session.matches() {
                    Phase::Finished(Outcome::Win)
                } else {
                    let lives = session.fail_attempt();
                    debug!("sequence mismatch, {=u8} lives left", lives);
                    board.clear_region(LIVES_PAGE, LIVES_SEG, LIVES_WIDTH);
                    show_lives(board, lives);
                    if lives == 0 {
                        Phase::Finished(Outcome::Lose)
                    } else {
                        Phase::InputCapture(edges)
                    }
                }
            }
            Phase::Finished(outcome) => {
                board.clear_screen();
                let text = match outcome {
                    Outcome::Win => "YOU WIN!",
                    Outcome::Lose => "YOU LOSE!",
                };
                show_at(board, 0, 0, text);
                board.wait(SEQUENCE_RESULT_HOLD).await;
                info!("sequence memory finished: {}", outcome);
                return outcome;
            }
        }
    }
}

/// Draws and blinks the sequence, returning the pattern to reproduce.
async fn present<B: Board>(board: &mut B, prng: &mut Prng) -> LanePattern {
    let mut pattern = LanePattern::default();
    for step in 0..STEPS {
        prng.advance();
        let lane = Lane::from_index(prng.draw(4));
        trace!("step {=u8}: {}", step, lane);
        board.write_indicator(lane.led(), true);
        board.wait(STEP_HOLD).await;
        board.write_indicator(lane.led(), false);
        board.wait(STEP_GAP).await;
        pattern.record(lane, step);
    }
    pattern
}

/// Collects exactly [`STEPS`] presses, mirroring each on its LED.
async fn capture_attempt<B: Board>(board: &mut B, edges: &mut NavEdges, session: &mut SequenceSession) {
    while !session.attempt_complete() {
        match edges.update(NavState::sample(board)) {
            NavEdge::Unchanged => yield_now().await,
            NavEdge::Released => board.reset_indicators(),
            NavEdge::Pressed(lane) => {
                board.reset_indicators();
                board.write_indicator(lane.led(), true);
                session.record_press(lane);
            }
        }
    }
}

fn show_lives<B: Board>(board: &mut B, lives: u8) {
    board.set_cursor(LIVES_PAGE, LIVES_SEG);
    render_number(board, u32::from(lives));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{presses, FakeBoard};
    use embassy_futures::block_on;
    use Lane::{Down, Left, Right, Up};

    const SHOWN: [Lane; 6] = [Left, Up, Right, Right, Down, Left];

    fn drawn_lanes(seed: u32) -> Vec<Lane> {
        let mut prng = Prng::new(seed);
        (0..STEPS)
            .map(|_| {
                prng.advance();
                Lane::from_index(prng.draw(4))
            })
            .collect()
    }

    /// A seed whose first six draws present `wanted`.
    fn seed_for(wanted: &[Lane]) -> u32 {
        (0u32..)
            .find(|&seed| drawn_lanes(seed) == wanted)
            .unwrap()
    }

    fn play(seed: u32, attempts: &[&[Lane]]) -> (Outcome, FakeBoard, Prng) {
        let flat: Vec<Lane> = attempts.iter().flat_map(|a| a.iter().copied()).collect();
        let mut board = FakeBoard::new();
        board.nav_frames = presses(&flat);
        let mut prng = Prng::new(seed);
        let outcome = block_on(run_sequence_memory(&mut board, &mut prng));
        (outcome, board, prng)
    }

    #[test]
    fn pattern_keeps_step_positions_per_lane() {
        let pattern = LanePattern::from_lanes(&SHOWN);
        assert_eq!(pattern.lane(Left).bits(), 0b10_0001);
        assert_eq!(pattern.lane(Right).bits(), 0b00_1100);
        assert_eq!(pattern.lane(Up).bits(), 0b00_0010);
        assert_eq!(pattern.lane(Down).bits(), 0b01_0000);
        assert!(pattern.lane(Left).contains(5));
        assert!(!pattern.lane(Left).contains(4));
    }

    #[test]
    fn same_presses_in_other_order_do_not_match() {
        let target = LanePattern::from_lanes(&SHOWN);
        let shuffled = LanePattern::from_lanes(&[Left, Left, Right, Right, Down, Up]);
        assert_ne!(target, shuffled);

        let mut session = SequenceSession::new(target);
        for lane in [Up, Left, Right, Right, Down, Left] {
            session.record_press(lane);
        }
        assert!(session.attempt_complete());
        assert!(!session.matches());
    }

    #[test]
    fn failed_attempt_resets_capture_only() {
        let target = LanePattern::from_lanes(&SHOWN);
        let mut session = SequenceSession::new(target);
        session.record_press(Down);
        assert_eq!(session.fail_attempt(), 2);
        assert_eq!(session.captured_sequence, LanePattern::default());
        assert_eq!(session.target_sequence, target);
        assert!(!session.attempt_complete());
    }

    #[test]
    fn exact_reproduction_wins_first_attempt() {
        let seed = seed_for(&SHOWN);
        let (outcome, board, _) = play(seed, &[&SHOWN]);
        assert_eq!(outcome, Outcome::Win);
        assert!(board.shows("YOU WIN!"));
        assert_eq!(board.numbers_at(LIVES_PAGE, LIVES_SEG), vec!["3"]);
    }

    #[test]
    fn presentation_blinks_lane_leds_with_holds() {
        let seed = seed_for(&SHOWN);
        let (_, board, _) = play(seed, &[&SHOWN]);
        let lit = board.lit();
        assert_eq!(&lit[..6], &[6, 0, 2, 2, 4, 6]);
        // feedback mirrors the presses
        assert_eq!(&lit[6..], &[6, 0, 2, 2, 4, 6]);
        let waits = board.waits();
        assert_eq!(waits.len(), 13);
        assert!(waits[..12].chunks(2).all(|w| w == [STEP_HOLD, STEP_GAP]));
        assert_eq!(waits[12], SEQUENCE_RESULT_HOLD);
    }

    #[test]
    fn last_step_wrong_three_times_loses() {
        let seed = seed_for(&SHOWN);
        let wrong: [Lane; 6] = [Left, Up, Right, Right, Down, Right];
        let (outcome, board, prng) = play(seed, &[&wrong, &wrong, &wrong]);
        assert_eq!(outcome, Outcome::Lose);
        assert!(board.shows("YOU LOSE!"));
        assert_eq!(board.numbers_at(LIVES_PAGE, LIVES_SEG), vec!["3", "2", "1", "0"]);

        // only the six presentation draws were made
        let mut reference = Prng::new(seed);
        for _ in 0..STEPS {
            reference.advance();
        }
        assert_eq!(prng, reference);
    }

    #[test]
    fn win_on_a_later_attempt_stops_retries() {
        let seed = seed_for(&SHOWN);
        let wrong: [Lane; 6] = [Down; 6];
        let (outcome, board, _) = play(seed, &[&wrong, &SHOWN]);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(board.numbers_at(LIVES_PAGE, LIVES_SEG), vec!["3", "2"]);
        assert!(!board.shows("YOU LOSE!"));

        let (outcome, board, _) = play(seed, &[&wrong, &wrong, &SHOWN]);
        assert_eq!(outcome, Outcome::Win);
        assert_eq!(board.numbers_at(LIVES_PAGE, LIVES_SEG), vec!["3", "2", "1"]);
    }

    #[test]
    fn any_seed_is_reproducible() {
        for seed in [1u32, 77, 0xabcd_ef01] {
            let shown = drawn_lanes(seed);
            let (outcome, _, _) = play(seed, &[&shown]);
            assert_eq!(outcome, Outcome::Win);
        }
    }

    #[test]
    fn held_buttons_count_once() {
        let seed = seed_for(&SHOWN);
        let mut frames = presses(&SHOWN);
        // hold the first press for a few extra samples
        let first = frames[1];
        frames.splice(1..1, [first; 3]);
        let mut board = FakeBoard::new();
        board.nav_frames = frames;
        let mut prng = Prng::new(seed);
        let outcome = block_on(run_sequence_memory(&mut board, &mut prng));
        assert_eq!(outcome, Outcome::Win);
    }
}
