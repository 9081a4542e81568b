//! Input capture: navigation pad edges, DIP switch vector, rotary encoder.

use crate::board::{Board, Channel, Led};

/// Logical direction of the navigation pad, also a Sequence-Memory lane.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lane {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Lane {
    /// Priority order when several directions read as pressed.
    pub const ALL: [Lane; 4] = [Lane::Left, Lane::Right, Lane::Up, Lane::Down];

    pub fn from_index(index: u8) -> Lane {
        Lane::ALL[usize::from(index)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Ring LED that mirrors this direction.
    pub fn led(self) -> Led {
        match self {
            Lane::Left => Led(6),
            Lane::Right => Led(2),
            Lane::Up => Led(0),
            Lane::Down => Led(4),
        }
    }
}

/// Combined level of the four navigation inputs, bit `lane` set when that
/// line reads high (released).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavState(u8);

impl NavState {
    pub const RELEASED: NavState = NavState(0b1111);

    pub fn sample<B: Board>(board: &mut B) -> NavState {
        let bits = Lane::ALL.iter().fold(0u8, |bits, &lane| {
            bits | (u8::from(board.read_digital(Channel::Nav(lane))) << lane.index())
        });
        NavState(bits)
    }

    pub fn is_pressed(self, lane: Lane) -> bool {
        self.0 & (1 << lane.index()) == 0
    }

    /// First pressed direction in priority order.
    pub fn first_pressed(self) -> Option<Lane> {
        Lane::ALL.into_iter().find(|&lane| self.is_pressed(lane))
    }
}

/// Recognises navigation events by level change against the last sample.
///
/// No time-based debounce: every change of the combined state counts as a
/// transition, and only transitions that leave a direction pressed yield a
/// lane.
#[derive(Debug)]
pub struct NavEdges {
    last: NavState,
}

/// What one poll of [`NavEdges`] observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEdge {
    Unchanged,
    Released,
    Pressed(Lane),
}

impl NavEdges {
    pub fn new(baseline: NavState) -> Self {
        Self { last: baseline }
    }

    pub fn update(&mut self, state: NavState) -> NavEdge {
        if state == self.last {
            return NavEdge::Unchanged;
        }
        self.last = state;
        match state.first_pressed() {
            Some(lane) => NavEdge::Pressed(lane),
            None => NavEdge::Released,
        }
    }
}

/// The 8 DIP switches as one byte, switch `n` in bit `n`.
pub fn read_switches<B: Board>(board: &mut B) -> u8 {
    (0..8u8).fold(0u8, |value, n| {
        value | (u8::from(board.read_digital(Channel::Dip(n))) << n)
    })
}

/// Rotation step decoded from the encoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Quadrature decoder clocked on channel B transitions.
#[derive(Debug)]
pub struct Quadrature {
    last_b: bool,
}

impl Quadrature {
    pub fn new(b: bool) -> Self {
        Self { last_b: b }
    }

    /// Feed one sample of both channels.
    pub fn update(&mut self, a: bool, b: bool) -> Option<Rotation> {
        if b == self.last_b {
            return None;
        }
        self.last_b = b;
        if a != b {
            Some(Rotation::CounterClockwise)
        } else {
            Some(Rotation::Clockwise)
        }
    }
}
