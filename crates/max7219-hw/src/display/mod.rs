//! MAX7219 display module.
//!
//! Drives the controller's serial interface by toggling DIN, CLK and LOAD
//! directly, and encodes text into per-digit register values.

mod device;
mod protocol;

pub mod frame;

pub use device::Max7219;
pub use frame::{DigitCode, FillPolicy, RegisterFrame, Slot};
pub use protocol::{frame_word, DecodeMode, Register};
