//! Fixed holds used by the games and LED effects.

use embassy_time::Duration;

/// Sequence-Memory: how long each presented LED stays lit.
pub const STEP_HOLD: Duration = Duration::from_millis(75);
/// Sequence-Memory: dark gap between two presented LEDs.
pub const STEP_GAP: Duration = Duration::from_millis(75);
/// Sequence-Memory: result screen hold before returning to the menu.
pub const SEQUENCE_RESULT_HOLD: Duration = Duration::from_millis(600);

/// Guess-The-Number: suspense delay while "checking".
pub const CHECKING_HOLD: Duration = Duration::from_millis(450);
/// Guess-The-Number: result screen hold before returning to the menu.
pub const GUESS_RESULT_HOLD: Duration = Duration::from_millis(1500);

/// LED chase period before the first potentiometer reading.
pub const CHASE_INITIAL_PERIOD: Duration = Duration::from_micros(37_500);
