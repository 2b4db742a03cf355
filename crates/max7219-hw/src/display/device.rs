//! MAX7219 controller driven over three bit-banged GPIO lines.

use embedded_hal::delay::DelayNs;
use tracing::{debug, info, trace};

use crate::gpio::{Gpio, PinMode, PinState, Pins};
use crate::{Error, Result};

use super::frame::RegisterFrame;
use super::protocol::{
    frame_word, Register, DIGIT_REGISTERS, DISPLAY_TEST_OFF, MAX_INTENSITY, MAX_SCAN_LIMIT,
    SHUTDOWN_NORMAL, WORD_BITS,
};

/// MAX7219 controller.
///
/// Line timing: with the default hold time of zero, consecutive line writes
/// are separated only by the GPIO write latency of the platform. The MAX7219
/// needs 50 ns CLK high/low width and 25 ns DIN setup time. Memory-mapped GPIO
/// on newer boards can toggle faster than that; set a hold time with
/// [`Max7219::with_hold_time`] there.
pub struct Max7219<G, D> {
    gpio: G,
    delay: D,
    pins: Pins,
    hold_ns: u32,
}

impl<G: Gpio, D: DelayNs> Max7219<G, D> {
    /// Creates a driver for the controller wired to `pins`. No line is touched
    /// until [`Max7219::initialize`].
    pub fn new(gpio: G, delay: D, pins: Pins) -> Self {
        Self {
            gpio,
            delay,
            pins,
            hold_ns: 0,
        }
    }

    /// Waits `ns` nanoseconds after every line write.
    pub fn with_hold_time(mut self, ns: u32) -> Self {
        self.hold_ns = ns;
        self
    }

    /// Returns the GPIO and delay handles.
    pub fn into_parts(self) -> (G, D) {
        (self.gpio, self.delay)
    }

    fn set_line(&mut self, pin: u8, level: PinState) -> Result<()> {
        self.gpio.write(pin, level)?;
        if self.hold_ns > 0 {
            self.delay.delay_ns(self.hold_ns);
        }
        Ok(())
    }

    /// Shifts the 16 bits of `word` out MSB first.
    ///
    /// Per bit: CLK low, DIN to the bit value, CLK high. The controller
    /// samples DIN on the rising edge of CLK.
    pub fn send_bits(&mut self, word: u16) -> Result<()> {
        trace!("Shifting {:016b}", word);

        for bit in (0..WORD_BITS).rev() {
            let level = PinState::from(word & (1 << bit) != 0);
            self.set_line(self.pins.clock, PinState::Low)?;
            self.set_line(self.pins.data, level)?;
            self.set_line(self.pins.clock, PinState::High)?;
        }

        Ok(())
    }

    /// Sends one `(address, data)` transaction and latches it.
    ///
    /// LOAD is held high while the word is shifted, then pulsed low and back
    /// high; the rising edge makes the controller adopt the shifted word.
    pub fn send_transaction(&mut self, address: u8, data: u8) -> Result<()> {
        let word = frame_word(address, data);

        self.set_line(self.pins.load, PinState::High)?;
        self.send_bits(word)?;
        self.set_line(self.pins.load, PinState::Low)?;
        self.set_line(self.pins.load, PinState::High)?;

        debug!("Sent register {:#04x} = {:#04x}", address, data);
        Ok(())
    }

    /// Writes `data` to `register`.
    pub fn write_register(&mut self, register: Register, data: u8) -> Result<()> {
        self.send_transaction(register.into(), data)
    }

    /// Configures the lines and brings the controller into normal operation.
    ///
    /// `scan_limit` is the number of scanned digits minus one (0-7),
    /// `intensity` the brightness (0-15). Both are checked before any line is
    /// touched. Fails with [`Error::LoadNotHigh`] if LOAD does not read back
    /// high after being driven high.
    pub fn initialize(
        &mut self,
        scan_limit: u8,
        decode_mode: impl Into<u8>,
        intensity: u8,
    ) -> Result<()> {
        if scan_limit > MAX_SCAN_LIMIT {
            return Err(Error::InvalidScanLimit(scan_limit));
        }
        if intensity > MAX_INTENSITY {
            return Err(Error::InvalidIntensity(intensity));
        }
        let decode_mode = decode_mode.into();

        let Pins { data, clock, load } = self.pins;
        self.gpio.set_mode(data, PinMode::Output)?;
        self.gpio.set_mode(clock, PinMode::Output)?;
        self.gpio.set_mode(load, PinMode::Output)?;

        self.set_line(load, PinState::High)?;
        self.set_line(clock, PinState::Low)?;
        self.set_line(data, PinState::Low)?;

        if self.gpio.read(load)? != PinState::High {
            return Err(Error::LoadNotHigh(load));
        }

        // Flush whatever stray clocks shifted in before we owned the lines
        self.write_register(Register::NoOp, 0x00)?;

        self.write_register(Register::ScanLimit, scan_limit)?;
        self.write_register(Register::DecodeMode, decode_mode)?;
        self.write_register(Register::DisplayTest, DISPLAY_TEST_OFF)?;
        self.write_register(Register::Intensity, intensity)?;
        self.write_register(Register::Shutdown, SHUTDOWN_NORMAL)?;

        info!(
            "MAX7219 initialized (scan limit: {}, decode mode: {:#04x}, intensity: {})",
            scan_limit, decode_mode, intensity
        );
        Ok(())
    }

    /// Writes all eight digit registers, digit 0 first.
    pub fn write_frame(&mut self, frame: RegisterFrame) -> Result<()> {
        for (register, value) in DIGIT_REGISTERS.into_iter().zip(frame.registers()) {
            self.write_register(register, value)?;
        }

        debug!("Frame written");
        Ok(())
    }
}
