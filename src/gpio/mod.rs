//! Digital I/O lines for the lock sensor, reset button and indicators.
//!
//! Lines are claimed through a [`LineProvider`]. With the `gpio` feature the
//! default provider talks to the Raspberry Pi through `rppal`; without it the
//! default provider refuses to open, so a binary built for the wrong target
//! fails at startup. The in-memory board in [`mock`] backs tests and benches.

pub mod mock;

#[cfg(feature = "gpio")]
pub mod raspberry_pi;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Electrical level of a digital line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Level {
    /// Line is driven or reads low
    Low,
    /// Line is driven or reads high
    High,
}

impl Level {
    /// Whether the level is [`Level::High`].
    pub fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// The opposite level.
    pub fn toggled(self) -> Self {
        match self {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => f.write_str("HIGH"),
            Level::Low => f.write_str("LOW"),
        }
    }
}

/// A line configured as input.
pub trait InputLine: Send {
    /// (Re-)apply the pull-down bias.
    fn set_pull_down(&mut self);

    /// Sample the current level.
    fn read(&mut self) -> Level;
}

/// A line configured as output.
pub trait OutputLine: Send {
    /// Drive the line to `level`.
    fn write(&mut self, level: Level);

    /// Level the line is currently driven to.
    fn level(&self) -> Level;

    /// Drive the line high.
    fn set_high(&mut self) {
        self.write(Level::High);
    }

    /// Drive the line low.
    fn set_low(&mut self) {
        self.write(Level::Low);
    }

    /// Invert the driven level.
    fn toggle(&mut self) {
        let next = self.level().toggled();
        self.write(next);
    }
}

/// Source of configured lines.
pub trait LineProvider {
    /// Input line type handed out by this provider.
    type Input: InputLine + 'static;
    /// Output line type handed out by this provider.
    type Output: OutputLine + 'static;

    /// Claim `pin` as an input with pull-down bias.
    fn input(&self, pin: u8) -> Result<Self::Input>;

    /// Claim `pin` as an output, initially driven low.
    fn output(&self, pin: u8) -> Result<Self::Output>;
}

// Re-export the appropriate line provider
#[cfg(feature = "gpio")]
pub use raspberry_pi::RaspberryPiLines as DefaultLineProvider;

#[cfg(not(feature = "gpio"))]
pub use self::UnsupportedLines as DefaultLineProvider;

/// Provider for builds without the `gpio` feature. Every claim fails.
#[cfg(not(feature = "gpio"))]
#[derive(Debug, Clone, Copy)]
pub struct UnsupportedLines;

#[cfg(not(feature = "gpio"))]
impl UnsupportedLines {
    const MESSAGE: &'static str = "GPIO support not compiled in (build with --features gpio)";

    /// Always fails: there is no hardware to open.
    pub fn new() -> Result<Self> {
        Err(crate::error::OccupiError::gpio_error(Self::MESSAGE))
    }
}

#[cfg(not(feature = "gpio"))]
impl LineProvider for UnsupportedLines {
    type Input = mock::MockInput;
    type Output = mock::MockOutput;

    fn input(&self, _pin: u8) -> Result<Self::Input> {
        Err(crate::error::OccupiError::gpio_error(Self::MESSAGE))
    }

    fn output(&self, _pin: u8) -> Result<Self::Output> {
        Err(crate::error::OccupiError::gpio_error(Self::MESSAGE))
    }
}
