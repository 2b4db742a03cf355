//! Error types for the MAX7219 driver library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding a frame or driving the controller.
#[derive(Error, Debug)]
pub enum Error {
    /// Character outside the displayable set.
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// More digit-producing characters than the display has digits.
    #[error("Input longer than expected (at most {max} digits)")]
    InputTooLong { max: usize },

    /// Scan limit outside 0-7.
    #[error("Invalid number of digits {0} (should be 0 to 7)")]
    InvalidScanLimit(u8),

    /// Intensity outside 0-15.
    #[error("Invalid brightness {0} (should be 0 to 15)")]
    InvalidIntensity(u8),

    /// Unknown fill policy name.
    #[error("Invalid fill policy: {0}")]
    InvalidFillPolicy(String),

    /// The LOAD line did not read back high after being driven high.
    #[error("LOAD pin {0} failed to go high")]
    LoadNotHigh(u8),

    /// A line was used before being configured.
    #[error("GPIO pin {0} is not configured")]
    PinNotConfigured(u8),

    /// Raspberry Pi GPIO peripheral error.
    #[cfg(feature = "rpi")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),
}

/// Broad failure class, used by callers to pick an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input or bad configuration values.
    Validation,
    /// The GPIO platform could not be set up or a line could not be claimed.
    Platform,
    /// The hardware did not behave as driven.
    Hardware,
}

impl Error {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCharacter { .. }
            | Error::InputTooLong { .. }
            | Error::InvalidScanLimit(_)
            | Error::InvalidIntensity(_)
            | Error::InvalidFillPolicy(_) => ErrorKind::Validation,
            Error::LoadNotHigh(_) => ErrorKind::Hardware,
            Error::PinNotConfigured(_) => ErrorKind::Platform,
            #[cfg(feature = "rpi")]
            Error::Gpio(_) => ErrorKind::Platform,
        }
    }
}
