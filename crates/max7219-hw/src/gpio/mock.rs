//! Recording GPIO and delay doubles for driver tests.

use std::collections::HashMap;

use embedded_hal::delay::DelayNs;

use super::{Gpio, PinMode, PinState, Pins};
use crate::{Error, Result};

/// One observed call on the GPIO seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mode(u8, PinMode),
    Write(u8, PinState),
    Read(u8),
}

/// GPIO double that records every call and tracks line levels.
#[derive(Debug, Default)]
pub struct MockGpio {
    pub events: Vec<Event>,
    levels: HashMap<u8, PinState>,
    modes: HashMap<u8, PinMode>,
    stuck_low: Option<u8>,
}

impl MockGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line that accepts writes but always reads back low.
    pub fn with_stuck_low(pin: u8) -> Self {
        Self {
            stuck_low: Some(pin),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(u8, PinState)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::Write(pin, level) => Some((pin, level)),
                _ => None,
            })
            .collect()
    }
}

impl Gpio for MockGpio {
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        self.events.push(Event::Mode(pin, mode));
        self.modes.insert(pin, mode);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: PinState) -> Result<()> {
        if self.modes.get(&pin) != Some(&PinMode::Output) {
            return Err(Error::PinNotConfigured(pin));
        }
        self.events.push(Event::Write(pin, level));
        self.levels.insert(pin, level);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<PinState> {
        if !self.modes.contains_key(&pin) {
            return Err(Error::PinNotConfigured(pin));
        }
        self.events.push(Event::Read(pin));
        if self.stuck_low == Some(pin) {
            return Ok(PinState::Low);
        }
        Ok(self.levels.get(&pin).copied().unwrap_or(PinState::Low))
    }
}

/// A word latched by a LOAD rising edge, with the number of clock pulses seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latched {
    pub word: u16,
    pub clocks: usize,
}

impl Latched {
    pub fn address(&self) -> u8 {
        (self.word >> 8) as u8
    }

    pub fn data(&self) -> u8 {
        (self.word & 0xFF) as u8
    }
}

/// Replays recorded writes the way the controller sees them: DATA is sampled
/// on CLK rising edges and the shifted word is latched on a LOAD rising edge.
/// Lines start in an unknown state, so the very first write never counts as an edge.
pub fn decode(writes: &[(u8, PinState)], pins: Pins) -> Vec<Latched> {
    let mut data = PinState::Low;
    let mut clock: Option<PinState> = None;
    let mut load: Option<PinState> = None;
    let mut shifted: Vec<bool> = Vec::new();
    let mut latched = Vec::new();

    for &(pin, level) in writes {
        if pin == pins.data {
            data = level;
        } else if pin == pins.clock {
            if clock == Some(PinState::Low) && level == PinState::High {
                shifted.push(data == PinState::High);
            }
            clock = Some(level);
        } else if pin == pins.load {
            if load == Some(PinState::Low) && level == PinState::High {
                let start = shifted.len().saturating_sub(16);
                let word = shifted[start..]
                    .iter()
                    .fold(0u16, |acc, &bit| (acc << 1) | u16::from(bit));
                latched.push(Latched {
                    word,
                    clocks: shifted.len(),
                });
                shifted.clear();
            }
            load = Some(level);
        }
    }

    latched
}

/// Delay double that accumulates requested wait time.
#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls: usize,
    pub total_ns: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}
