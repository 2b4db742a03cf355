//! MAX7219 register map and transaction framing.
//!
//! Each transaction is a 16-bit word shifted MSB first:
//! - Bits 15-8: register address (only the low nibble is decoded)
//! - Bits 7-0: register data
//!
//! The word is latched on the rising edge of LOAD.

use super::frame::DIGIT_COUNT;

/// Bits per transaction.
pub const WORD_BITS: u32 = 16;

/// Highest scan limit value (all 8 digits scanned).
pub const MAX_SCAN_LIMIT: u8 = 7;

/// Highest intensity value (31/32 duty cycle).
pub const MAX_INTENSITY: u8 = 15;

/// Shutdown register value for normal operation.
pub const SHUTDOWN_NORMAL: u8 = 0x01;

/// Display-test register value for normal operation.
pub const DISPLAY_TEST_OFF: u8 = 0x00;

/// Controller register addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// No operation; used to flush the shift register.
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    /// Per-digit Code B decode enable bits.
    DecodeMode = 0x09,
    /// Segment brightness, 0-15.
    Intensity = 0x0A,
    /// Number of scanned digits minus one.
    ScanLimit = 0x0B,
    /// 0 = shutdown, 1 = normal operation.
    Shutdown = 0x0C,
    /// 1 = all segments lit.
    DisplayTest = 0x0F,
}

/// Digit-data registers in frame slot order (slot 0 = rightmost digit).
pub const DIGIT_REGISTERS: [Register; DIGIT_COUNT] = [
    Register::Digit0,
    Register::Digit1,
    Register::Digit2,
    Register::Digit3,
    Register::Digit4,
    Register::Digit5,
    Register::Digit6,
    Register::Digit7,
];

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register as u8
    }
}

/// Decode-mode register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum DecodeMode {
    /// Raw segment data on every digit (bit 0 = segment G ... bit 6 = A, bit 7 = DP).
    NoDecode = 0x00,
    /// Code B on digit 0 only.
    CodeBDigit0 = 0x01,
    /// Code B on digits 0-3.
    CodeBDigits3_0 = 0x0F,
    /// Code B on all digits: 0-9, -, E, H, L, P and blank.
    #[default]
    CodeBDigits7_0 = 0xFF,
}

impl From<DecodeMode> for u8 {
    fn from(mode: DecodeMode) -> u8 {
        mode as u8
    }
}

/// Packs a register address and data byte into one transaction word.
pub fn frame_word(address: u8, data: u8) -> u16 {
    (u16::from(address) << 8) | u16::from(data)
}
