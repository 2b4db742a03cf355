//! Text to digit-register encoding.
//!
//! Text is read right to left so the last character lands on digit 0, the
//! rightmost digit of the display. A `.` lights the decimal point of the
//! digit to its left and does not occupy a digit of its own.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::{Error, Result};

/// Number of digit registers on the controller.
pub const DIGIT_COUNT: usize = 8;

/// Decimal point bit in a Code B digit register.
pub const DECIMAL_POINT: u8 = 0x80;

/// A Code B character code (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCode(u8);

impl DigitCode {
    pub const MINUS: Self = Self(0x0A);
    pub const E: Self = Self(0x0B);
    pub const H: Self = Self(0x0C);
    pub const L: Self = Self(0x0D);
    pub const P: Self = Self(0x0E);
    pub const BLANK: Self = Self(0x0F);

    /// Returns the code for `c`, or `None` if Code B cannot show it.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self(c as u8 - b'0')),
            '-' => Some(Self::MINUS),
            'E' | 'e' => Some(Self::E),
            'H' | 'h' => Some(Self::H),
            'L' | 'l' => Some(Self::L),
            'P' | 'p' => Some(Self::P),
            ' ' => Some(Self::BLANK),
            _ => None,
        }
    }

    /// Returns the raw 4-bit code.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// What unwritten digits show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Code 0, shown as a `0`. This is what the `dispnum` tool has always done.
    #[default]
    Zero,
    /// Code 15, a dark digit.
    Blank,
}

impl FillPolicy {
    fn code(self) -> DigitCode {
        match self {
            FillPolicy::Zero => DigitCode(0),
            FillPolicy::Blank => DigitCode::BLANK,
        }
    }
}

impl FromStr for FillPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(FillPolicy::Zero),
            "blank" => Ok(FillPolicy::Blank),
            _ => Err(Error::InvalidFillPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for FillPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPolicy::Zero => write!(f, "zero"),
            FillPolicy::Blank => write!(f, "blank"),
        }
    }
}

/// One digit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slot {
    /// Character code, `None` if no character was written here.
    pub code: Option<DigitCode>,
    /// Whether the decimal point is lit.
    pub decimal_point: bool,
}

impl Slot {
    /// Returns the register byte for this slot.
    pub fn register(&self, fill: FillPolicy) -> u8 {
        let code = self.code.unwrap_or_else(|| fill.code()).value();
        if self.decimal_point {
            code | DECIMAL_POINT
        } else {
            code
        }
    }
}

/// The eight digit registers for one display update. Slot 0 is the rightmost digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFrame {
    slots: [Slot; DIGIT_COUNT],
    fill: FillPolicy,
}

impl RegisterFrame {
    /// Encodes `input`, showing unwritten digits as `0`.
    pub fn encode(input: &str) -> Result<Self> {
        Self::encode_with(input, FillPolicy::default())
    }

    /// Encodes `input`, showing unwritten digits according to `fill`.
    ///
    /// Fails on the first character Code B cannot show, or when more than
    /// [`DIGIT_COUNT`] digits would be needed.
    pub fn encode_with(input: &str, fill: FillPolicy) -> Result<Self> {
        let chars: Vec<char> = input.chars().collect();
        let mut slots = [Slot::default(); DIGIT_COUNT];
        let mut cursor = 0;

        for (position, &character) in chars.iter().enumerate().rev() {
            if character == '.' {
                // OR-ed in, so a code already in the slot survives
                let slot = slots
                    .get_mut(cursor)
                    .ok_or(Error::InputTooLong { max: DIGIT_COUNT })?;
                slot.decimal_point = true;
                trace!("'.' -> DP on digit {}", cursor);
                continue;
            }

            let code = DigitCode::from_char(character).ok_or(Error::InvalidCharacter {
                character,
                position,
            })?;
            let slot = slots
                .get_mut(cursor)
                .ok_or(Error::InputTooLong { max: DIGIT_COUNT })?;
            slot.code = Some(code);
            trace!("'{}' -> digit {} code {:#x}", character, cursor, code.value());
            cursor += 1;
        }

        Ok(Self { slots, fill })
    }

    /// Returns the digit slots, rightmost first.
    pub fn slots(&self) -> &[Slot; DIGIT_COUNT] {
        &self.slots
    }

    /// Returns the fill policy for unwritten digits.
    pub fn fill(&self) -> FillPolicy {
        self.fill
    }

    /// Returns the register byte for every digit, rightmost first.
    pub fn registers(&self) -> [u8; DIGIT_COUNT] {
        self.slots.map(|slot| slot.register(self.fill))
    }
}
