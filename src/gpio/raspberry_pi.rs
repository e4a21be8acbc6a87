//! Raspberry Pi lines backed by `rppal`.

use super::{InputLine, Level, LineProvider, OutputLine};
use crate::error::{OccupiError, Result};
use rppal::gpio::{Gpio, IoPin, Mode, OutputPin, PullUpDown};

/// Raspberry Pi line provider using rppal.
pub struct RaspberryPiLines {
    gpio: Gpio,
}

impl RaspberryPiLines {
    /// Open the GPIO peripheral.
    pub fn new() -> Result<Self> {
        let gpio = Gpio::new()
            .map_err(|e| OccupiError::gpio_error(format!("Could not open GPIO: {}", e)))?;

        Ok(Self { gpio })
    }
}

impl LineProvider for RaspberryPiLines {
    type Input = PiInput;
    type Output = PiOutput;

    fn input(&self, pin: u8) -> Result<PiInput> {
        let mut io = self
            .gpio
            .get(pin)
            .map_err(|e| OccupiError::gpio_error(format!("Failed to claim pin {}: {}", pin, e)))?
            .into_io(Mode::Input);
        io.set_pullupdown(PullUpDown::PullDown);

        Ok(PiInput { pin: io })
    }

    fn output(&self, pin: u8) -> Result<PiOutput> {
        let out = self
            .gpio
            .get(pin)
            .map_err(|e| OccupiError::gpio_error(format!("Failed to claim pin {}: {}", pin, e)))?
            .into_output_low();

        Ok(PiOutput { pin: out })
    }
}

/// Input pin. Kept as an `IoPin` so the bias can be re-applied on every poll.
pub struct PiInput {
    pin: IoPin,
}

impl InputLine for PiInput {
    fn set_pull_down(&mut self) {
        self.pin.set_pullupdown(PullUpDown::PullDown);
    }

    fn read(&mut self) -> Level {
        Level::from(self.pin.is_high())
    }
}

/// Output pin.
pub struct PiOutput {
    pin: OutputPin,
}

impl OutputLine for PiOutput {
    fn write(&mut self, level: Level) {
        match level {
            Level::High => self.pin.set_high(),
            Level::Low => self.pin.set_low(),
        }
    }

    fn level(&self) -> Level {
        Level::from(self.pin.is_set_high())
    }
}
