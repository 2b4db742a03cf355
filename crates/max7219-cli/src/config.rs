//! Configuration management.

use anyhow::{Context, Result};
use max7219_hw::{FillPolicy, Pins};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GPIO pin assignment
    #[serde(default)]
    pub pins: PinsConfig,

    /// Controller settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// GPIO pin assignment (BCM numbering).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinsConfig {
    #[serde(default = "default_data_pin")]
    pub data: u8,

    #[serde(default = "default_clock_pin")]
    pub clock: u8,

    #[serde(default = "default_load_pin")]
    pub load: u8,
}

impl Default for PinsConfig {
    fn default() -> Self {
        Self {
            data: default_data_pin(),
            clock: default_clock_pin(),
            load: default_load_pin(),
        }
    }
}

impl From<&PinsConfig> for Pins {
    fn from(pins: &PinsConfig) -> Self {
        Pins {
            data: pins.data,
            clock: pins.clock,
            load: pins.load,
        }
    }
}

/// Controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Scanned digits minus one (0-7)
    #[serde(default = "default_scan_limit")]
    pub scan_limit: u8,

    /// Decode-mode register value (0xFF = Code B on all digits)
    #[serde(default = "default_decode_mode")]
    pub decode_mode: u8,

    /// Intensity (0-15)
    #[serde(default = "default_intensity")]
    pub intensity: u8,

    /// What unused digits show: "zero" or "blank"
    #[serde(default = "default_fill")]
    pub fill: String,

    /// Extra wait after every line write, in nanoseconds
    #[serde(default)]
    pub hold_ns: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scan_limit: default_scan_limit(),
            decode_mode: default_decode_mode(),
            intensity: default_intensity(),
            fill: default_fill(),
            hold_ns: 0,
        }
    }
}

// Default value functions
fn default_data_pin() -> u8 {
    Pins::default().data
}

fn default_clock_pin() -> u8 {
    Pins::default().clock
}

fn default_load_pin() -> u8 {
    Pins::default().load
}

fn default_scan_limit() -> u8 {
    7
}

fn default_decode_mode() -> u8 {
    max7219_hw::DecodeMode::CodeBDigits7_0.into()
}

fn default_intensity() -> u8 {
    8
}

fn default_fill() -> String {
    FillPolicy::default().to_string()
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse configuration")?;
        Ok(config)
    }

    /// Returns the fill policy for unused digits.
    pub fn fill_policy(&self) -> Result<FillPolicy> {
        let fill = self.display.fill.parse::<FillPolicy>()?;
        Ok(fill)
    }
}
