//! MAX7219 Hardware Library
//!
//! Drives a MAX7219 7-segment display controller from general purpose GPIO
//! lines by bit-banging its serial interface, and encodes short numeric
//! strings into the controller's Code B digit registers.

pub mod display;
pub mod error;
pub mod gpio;

pub use display::{DecodeMode, DigitCode, FillPolicy, Max7219, Register, RegisterFrame};
pub use error::{Error, ErrorKind, Result};
pub use gpio::{Gpio, PinMode, PinState, Pins};

#[cfg(feature = "rpi")]
pub use gpio::{RppalDelay, RppalGpio};
