//! GPIO platform interface.
//!
//! The driver only needs three output lines and a read-back of one of them,
//! so the seam is kept to pin-mode configuration, write and read by pin number.

#[cfg(test)]
pub(crate) mod mock;
#[cfg(feature = "rpi")]
mod rpi;

#[cfg(feature = "rpi")]
pub use rpi::{RppalDelay, RppalGpio};

pub use embedded_hal::digital::PinState;

use crate::Result;

/// Direction of a GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Pin-level access to the platform's GPIO controller.
pub trait Gpio {
    /// Configures the direction of `pin`, claiming it on first use.
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<()>;

    /// Drives `pin` to `level`.
    fn write(&mut self, pin: u8, level: PinState) -> Result<()>;

    /// Reads the current level of `pin`.
    fn read(&mut self, pin: u8) -> Result<PinState>;
}

impl<G: Gpio + ?Sized> Gpio for &mut G {
    fn set_mode(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        (**self).set_mode(pin, mode)
    }

    fn write(&mut self, pin: u8, level: PinState) -> Result<()> {
        (**self).write(pin, level)
    }

    fn read(&mut self, pin: u8) -> Result<PinState> {
        (**self).read(pin)
    }
}

/// Pin assignment for the three controller lines (BCM numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pins {
    /// DIN on the controller.
    pub data: u8,
    /// CLK on the controller.
    pub clock: u8,
    /// LOAD (CS) on the controller.
    pub load: u8,
}

impl Default for Pins {
    /// GPIO17, GPIO27 and GPIO22: header pins 11, 13 and 15.
    fn default() -> Self {
        Self {
            data: 17,
            clock: 27,
            load: 22,
        }
    }
}
