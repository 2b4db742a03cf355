//! MAX7219 Number Display Tool
//!
//! Shows a short number on a MAX7219 driven 7-segment display wired to
//! the GPIO header.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use max7219_hw::{
    ErrorKind, FillPolicy, Gpio, Max7219, Pins, RegisterFrame, RppalDelay, RppalGpio,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "dispnum")]
#[command(about = "Show a number on a MAX7219 7-segment display")]
#[command(
    after_help = "Accepted characters: 0-9, -, E, H, L, P and space (blank digit).\n\
                  A '.' lights the decimal point of the digit before it.\n\
                  At most 8 digits."
)]
#[command(version)]
struct Cli {
    /// Text to display, e.g. "-12.5"
    #[arg(allow_hyphen_values = true)]
    text: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Intensity (0-15), overrides the configuration file
    #[arg(short, long)]
    intensity: Option<u8>,

    /// Show unused digits as blanks instead of zeros
    #[arg(long)]
    blank_pad: bool,
}

/// Exit status for input and configuration errors.
const EXIT_INVALID: u8 = 1;

/// Exit status when the display hardware does not respond to the lines.
const EXIT_HARDWARE: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("Error: {}", io);
            }
            return ExitCode::from(parse_error_status(&e));
        }
    };

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(text) = cli.text.as_deref() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("Error: {}", e);
        }
        return ExitCode::from(EXIT_INVALID);
    };

    match run(&cli, text, open_gpio) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Exit status for an argument parsing failure; `--help` and `--version` succeed.
fn parse_error_status(err: &clap::Error) -> u8 {
    if err.exit_code() == 0 {
        0
    } else {
        EXIT_INVALID
    }
}

/// Maps a failure to the process exit status.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<max7219_hw::Error>().map(|e| e.kind()) {
        Some(ErrorKind::Hardware) => EXIT_HARDWARE,
        _ => EXIT_INVALID,
    }
}

fn run<G, F>(cli: &Cli, text: &str, open: F) -> Result<()>
where
    G: Gpio,
    F: FnOnce() -> Result<G>,
{
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };
    if let Some(intensity) = cli.intensity {
        config.display.intensity = intensity;
    }
    let fill = if cli.blank_pad {
        FillPolicy::Blank
    } else {
        config.fill_policy()?
    };

    println!("Input parameter: '{}'", text);
    let trace: Vec<String> = text.chars().rev().map(String::from).collect();
    println!("{}", trace.join(" "));

    // Bad input must be rejected before any line is touched
    let frame = RegisterFrame::encode_with(text, fill)?;
    let registers = frame.registers();

    let gpio = open()?;
    show(gpio, &config, frame)?;

    for (i, value) in registers.iter().enumerate() {
        println!("REGISTER[{}] = '{:#x}'", i, value);
    }

    Ok(())
}

fn show<G: Gpio>(gpio: G, config: &Config, frame: RegisterFrame) -> Result<()> {
    let pins = Pins::from(&config.pins);
    debug!(
        "Using DIN=GPIO{} CLK=GPIO{} LOAD=GPIO{}",
        pins.data, pins.clock, pins.load
    );

    let mut display =
        Max7219::new(gpio, RppalDelay::new(), pins).with_hold_time(config.display.hold_ns);
    display.initialize(
        config.display.scan_limit,
        config.display.decode_mode,
        config.display.intensity,
    )?;
    display.write_frame(frame)?;
    Ok(())
}

fn open_gpio() -> Result<RppalGpio> {
    let gpio = RppalGpio::new().context("Failed to set up GPIO")?;
    Ok(gpio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use max7219_hw::{PinMode, PinState};
    use std::collections::HashMap;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_number_is_text() {
        let cli = Cli::try_parse_from(["dispnum", "-12.5"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("-12.5"));

        let cli = Cli::try_parse_from(["dispnum", "-E"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("-E"));
    }

    #[test]
    fn test_options() {
        let cli =
            Cli::try_parse_from(["dispnum", "--intensity", "3", "--blank-pad", "42"]).unwrap();
        assert_eq!(cli.text.as_deref(), Some("42"));
        assert_eq!(cli.intensity, Some(3));
        assert!(cli.blank_pad);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_missing_text() {
        let cli = Cli::try_parse_from(["dispnum"]).unwrap();
        assert!(cli.text.is_none());
    }

    #[test]
    fn test_usage_errors_are_invalid_input() {
        let err = Cli::try_parse_from(["dispnum", "--intensity", "300", "1"])
            .err()
            .unwrap();
        assert_eq!(parse_error_status(&err), EXIT_INVALID);

        let err = Cli::try_parse_from(["dispnum", "--bogus", "1"]).err().unwrap();
        assert_eq!(parse_error_status(&err), EXIT_INVALID);

        let err = Cli::try_parse_from(["dispnum", "12", "34"]).err().unwrap();
        assert_eq!(parse_error_status(&err), EXIT_INVALID);
    }

    #[test]
    fn test_help_and_version_succeed() {
        let err = Cli::try_parse_from(["dispnum", "--help"]).err().unwrap();
        assert_eq!(parse_error_status(&err), 0);

        let err = Cli::try_parse_from(["dispnum", "--version"]).err().unwrap();
        assert_eq!(parse_error_status(&err), 0);
    }

    /// Records writes and reads back the last level written.
    #[derive(Default)]
    struct RecordingGpio {
        writes: usize,
        levels: HashMap<u8, PinState>,
    }

    impl Gpio for RecordingGpio {
        fn set_mode(&mut self, _pin: u8, _mode: PinMode) -> max7219_hw::Result<()> {
            Ok(())
        }

        fn write(&mut self, pin: u8, level: PinState) -> max7219_hw::Result<()> {
            self.writes += 1;
            self.levels.insert(pin, level);
            Ok(())
        }

        fn read(&mut self, pin: u8) -> max7219_hw::Result<PinState> {
            Ok(self.levels.get(&pin).copied().unwrap_or(PinState::Low))
        }
    }

    #[test]
    fn test_bad_text_never_opens_gpio() {
        let cli = Cli::try_parse_from(["dispnum", "12x"]).unwrap();
        let mut gpio = RecordingGpio::default();
        let mut opened = false;
        let flag = &mut opened;
        let target = &mut gpio;

        let err = run(&cli, "12x", move || {
            *flag = true;
            Ok(target)
        })
        .unwrap_err();

        assert_eq!(exit_status(&err), EXIT_INVALID);
        assert!(!opened);
        assert_eq!(gpio.writes, 0);
    }

    #[test]
    fn test_run_writes_display() {
        let cli = Cli::try_parse_from(["dispnum", "12"]).unwrap();
        let mut gpio = RecordingGpio::default();

        let target = &mut gpio;
        run(&cli, "12", move || Ok(target)).unwrap();

        // 6 setup + 8 digit transactions of 51 writes, plus 3 initial line states
        assert_eq!(gpio.writes, 3 + 14 * 51);
    }

    #[test]
    fn test_exit_status() {
        let hardware = anyhow::Error::from(max7219_hw::Error::LoadNotHigh(22));
        assert_eq!(exit_status(&hardware), EXIT_HARDWARE);

        let invalid = anyhow::Error::from(max7219_hw::Error::InputTooLong { max: 8 });
        assert_eq!(exit_status(&invalid), EXIT_INVALID);

        let wrapped = anyhow::Error::from(max7219_hw::Error::LoadNotHigh(22))
            .context("Failed to initialize display");
        assert_eq!(exit_status(&wrapped), EXIT_HARDWARE);

        assert_eq!(exit_status(&anyhow::anyhow!("bad config")), EXIT_INVALID);
    }
}
