//! Raspberry Pi GPIO backend.

use std::collections::HashMap;

use rppal::gpio::{Gpio as Peripheral, IoPin, Level, Mode};
use tracing::debug;

use super::{Gpio, PinMode, PinState};
use crate::{Error, Result};

/// Delay provider for line hold times.
pub use rppal::hal::Delay as RppalDelay;

/// GPIO access through the BCM GPIO peripheral (`/dev/gpiomem`).
pub struct RppalGpio {
    peripheral: Peripheral,
    lines: HashMap<u8, IoPin>,
}

impl RppalGpio {
    /// Opens the GPIO peripheral.
    ///
    /// Fails when the process lacks access to `/dev/gpiomem` or the board is
    /// not a supported Raspberry Pi.
    pub fn new() -> Result<Self> {
        let peripheral = Peripheral::new()?;
        debug!("GPIO peripheral opened");
        Ok(Self {
            peripheral,
            lines: HashMap::new(),
        })
    }

    fn line(&mut self, pin: u8) -> Result<&mut IoPin> {
        self.lines.get_mut(&pin).ok_or(Error::PinNotConfigured(pin))
    }
}

fn to_mode(mode: PinMode) -> Mode {
    match mode {
        PinMode::Input => Mode::Input,
        PinMode::Output => Mode::Output,
    }
}

impl Gpio for RppalGpio {
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        if let Some(line) = self.lines.get_mut(&pin) {
            line.set_mode(to_mode(mode));
            return Ok(());
        }

        let mut line = self.peripheral.get(pin)?.into_io(to_mode(mode));
        // The display keeps showing the last frame; leave the lines where we put them.
        line.set_reset_on_drop(false);
        self.lines.insert(pin, line);
        debug!("Claimed GPIO{} as {:?}", pin, mode);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: PinState) -> Result<()> {
        let level = match level {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        };
        self.line(pin)?.write(level);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<PinState> {
        let level = self.line(pin)?.read();
        Ok(match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        })
    }
}
