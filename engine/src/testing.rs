//! Scripted board used by the host tests.

use std::fmt::Write as _;

use embassy_time::Duration;

use crate::board::{Board, Channel, Led, LED_COUNT};
use crate::flags::EventFlags;
use crate::input::Lane;

/// Polls allowed before a test is considered stuck on an exhausted script.
const MAX_TICKS: usize = 100_000;

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Indicator(u8, bool),
    Wait(Duration),
    ClearScreen,
    ClearRegion(u8, u8, u8),
    Cursor(u8, u8),
    Text(String),
    Digit(u8),
    Fmt(String),
}

#[derive(Copy, Clone, Debug)]
pub enum Button {
    Sw1,
    Sw2,
    Sw3,
    Sw4,
    Exit,
}

pub struct FakeBoard {
    pub noise: Vec<bool>,
    pub noise_reads: usize,
    /// One byte per full switch sample; the last one repeats.
    pub switch_frames: Vec<u8>,
    pub switch_reads: usize,
    /// Pressed directions per nav sample, in `Lane::ALL` order.
    pub nav_frames: Vec<[bool; 4]>,
    pub nav_reads: usize,
    /// `(a, b)` encoder levels per sample.
    pub rotary_frames: Vec<(bool, bool)>,
    pub rotary_reads: usize,
    pub pot_frames: Vec<u16>,
    pub pot_reads: usize,
    pub leds: [bool; LED_COUNT as usize],
    pub events: Vec<Event>,
    flags: Option<&'static EventFlags>,
    scheduled: Vec<(usize, Button)>,
    ticks: usize,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            noise: Vec::new(),
            noise_reads: 0,
            switch_frames: Vec::new(),
            switch_reads: 0,
            nav_frames: Vec::new(),
            nav_reads: 0,
            rotary_frames: Vec::new(),
            rotary_reads: 0,
            pot_frames: Vec::new(),
            pot_reads: 0,
            leds: [false; LED_COUNT as usize],
            events: Vec::new(),
            flags: None,
            scheduled: Vec::new(),
            ticks: 0,
        }
    }

    /// Board wired to a leaked flag bus so scheduled presses can reach it.
    pub fn with_flags() -> (Self, &'static EventFlags) {
        let flags: &'static EventFlags = Box::leak(Box::new(EventFlags::new()));
        let mut board = Self::new();
        board.flags = Some(flags);
        (board, flags)
    }

    /// Raise `button` once `at` polls (switch, nav, rotary samples or waits)
    /// have happened.
    pub fn schedule(&mut self, at: usize, button: Button) {
        self.scheduled.push((at, button));
    }

    fn tick(&mut self) {
        self.ticks += 1;
        assert!(self.ticks < MAX_TICKS, "input script exhausted");
        let Some(flags) = self.flags else { return };
        let now = self.ticks;
        self.scheduled.retain(|&(at, button)| {
            if at > now {
                return true;
            }
            match button {
                Button::Sw1 => flags.sw1.raise(),
                Button::Sw2 => flags.sw2.raise(),
                Button::Sw3 => flags.sw3.raise(),
                Button::Sw4 => flags.sw4.raise(),
                Button::Exit => flags.exit.raise(),
            }
            false
        });
    }

    fn frame<T: Copy>(frames: &[T], reads: usize, idle: T) -> T {
        match frames.len() {
            0 => idle,
            len => frames[(reads - 1).min(len - 1)],
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Text(t) | Event::Fmt(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn shows(&self, text: &str) -> bool {
        self.texts().iter().any(|t| t.contains(text))
    }

    /// Digits drawn right after each cursor move to `(page, seg)`.
    pub fn numbers_at(&self, page: u8, seg: u8) -> Vec<String> {
        let mut out = Vec::new();
        let mut current: Option<String> = None;
        for event in &self.events {
            match event {
                Event::Cursor(p, s) if *p == page && *s == seg => {
                    if let Some(done) = current.take() {
                        out.push(done);
                    }
                    current = Some(String::new());
                }
                Event::Digit(d) => {
                    if let Some(n) = current.as_mut() {
                        write!(n, "{d}").unwrap();
                    }
                }
                Event::Fmt(text) => {
                    if let Some(n) = current.as_mut() {
                        n.push_str(text);
                    }
                }
                _ => {
                    if let Some(done) = current.take() {
                        out.push(done);
                    }
                }
            }
        }
        out.extend(current);
        out.retain(|n| !n.is_empty());
        out
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Wait(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// LEDs switched on, in order.
    pub fn lit(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Indicator(led, true) => Some(*led),
                _ => None,
            })
            .collect()
    }
}

/// Nav frames for a baseline followed by press/release of each lane.
pub fn presses(lanes: &[Lane]) -> Vec<[bool; 4]> {
    let mut frames = vec![[false; 4]];
    for lane in lanes {
        let mut down = [false; 4];
        down[lane.index()] = true;
        frames.push(down);
        frames.push([false; 4]);
    }
    frames
}

impl Board for FakeBoard {
    fn read_noise_bit(&mut self) -> bool {
        self.noise_reads += 1;
        self.noise.get(self.noise_reads - 1).copied().unwrap_or(false)
    }

    fn read_digital(&mut self, channel: Channel) -> bool {
        match channel {
            Channel::Dip(n) => {
                if n == 0 {
                    self.switch_reads += 1;
                    self.tick();
                }
                let value = Self::frame(&self.switch_frames, self.switch_reads.max(1), 0);
                value & (1 << n) != 0
            }
            Channel::Nav(lane) => {
                if lane == Lane::Left {
                    self.nav_reads += 1;
                    self.tick();
                }
                let pressed = Self::frame(&self.nav_frames, self.nav_reads.max(1), [false; 4]);
                !pressed[lane.index()]
            }
            Channel::RotaryA => {
                self.rotary_reads += 1;
                self.tick();
                Self::frame(&self.rotary_frames, self.rotary_reads, (false, false)).0
            }
            Channel::RotaryB => {
                Self::frame(&self.rotary_frames, self.rotary_reads.max(1), (false, false)).1
            }
        }
    }

    fn read_potentiometer(&mut self) -> u16 {
        self.pot_reads += 1;
        Self::frame(&self.pot_frames, self.pot_reads, 0)
    }

    fn write_indicator(&mut self, led: Led, on: bool) {
        self.leds[usize::from(led.0)] = on;
        self.events.push(Event::Indicator(led.0, on));
    }

    async fn wait(&mut self, duration: Duration) {
        self.events.push(Event::Wait(duration));
        self.tick();
    }

    fn clear_screen(&mut self) {
        self.events.push(Event::ClearScreen);
    }

    fn clear_region(&mut self, page: u8, seg: u8, width: u8) {
        self.events.push(Event::ClearRegion(page, seg, width));
    }

    fn set_cursor(&mut self, page: u8, seg: u8) {
        self.events.push(Event::Cursor(page, seg));
    }

    fn render_text(&mut self, text: &str) {
        self.events.push(Event::Text(text.into()));
    }

    fn render_digit_glyph(&mut self, digit: u8) {
        self.events.push(Event::Digit(digit));
    }

    fn render_fmt(&mut self, args: core::fmt::Arguments<'_>) {
        self.events.push(Event::Fmt(args.to_string()));
    }
}
