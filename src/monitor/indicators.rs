//! The three indicator LEDs shared by both monitors.
//!
//! Each LED sits behind its own mutex, held for a single write only. There is
//! no lock spanning several LEDs and no ordering between the lock and reset
//! monitors: a reset "clear all" may land between the two writes of a lock
//! edge, and the last writer wins per LED.

use super::state::LockState;
use crate::gpio::{Level, OutputLine};
use std::sync::{Arc, Mutex};

type SharedLine = Arc<Mutex<Box<dyn OutputLine>>>;

/// Which indicator LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Door is unlocked
    Open,
    /// Door is locked
    Lock,
    /// Input activity
    Input,
}

/// Snapshot of the three indicator levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorLevels {
    /// "Open" LED
    pub open: Level,
    /// "Lock" LED
    pub lock: Level,
    /// "Input" LED
    pub input: Level,
}

impl IndicatorLevels {
    /// All three LEDs off.
    pub const OFF: Self = Self {
        open: Level::Low,
        lock: Level::Low,
        input: Level::Low,
    };
}

/// Handle to the indicator LEDs. Cheap to clone.
#[derive(Clone)]
pub struct Indicators {
    open: SharedLine,
    lock: SharedLine,
    input: SharedLine,
}

impl Indicators {
    /// Wrap three configured output lines.
    pub fn new<O>(open: O, lock: O, input: O) -> Self
    where
        O: OutputLine + 'static,
    {
        let open: Box<dyn OutputLine> = Box::new(open);
        let lock: Box<dyn OutputLine> = Box::new(lock);
        let input: Box<dyn OutputLine> = Box::new(input);

        Self {
            open: Arc::new(Mutex::new(open)),
            lock: Arc::new(Mutex::new(lock)),
            input: Arc::new(Mutex::new(input)),
        }
    }

    fn line(&self, which: Indicator) -> &SharedLine {
        match which {
            Indicator::Open => &self.open,
            Indicator::Lock => &self.lock,
            Indicator::Input => &self.input,
        }
    }

    /// Drive one LED.
    pub fn set(&self, which: Indicator, level: Level) {
        let mut line = self
            .line(which)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        line.write(level);
    }

    /// Invert one LED.
    pub fn toggle(&self, which: Indicator) {
        let mut line = self
            .line(which)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        line.toggle();
    }

    /// Current level of one LED.
    pub fn get(&self, which: Indicator) -> Level {
        self.line(which)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .level()
    }

    /// Show a lock state on the open/lock LEDs. The input LED is left alone.
    pub fn show(&self, state: LockState) {
        let (open, lock) = match state {
            LockState::Locked => (Level::Low, Level::High),
            LockState::Unlocked => (Level::High, Level::Low),
            LockState::Unknown => (Level::Low, Level::Low),
        };
        self.set(Indicator::Open, open);
        self.set(Indicator::Lock, lock);
    }

    /// Turn every LED off.
    pub fn clear_all(&self) {
        self.set(Indicator::Open, Level::Low);
        self.set(Indicator::Lock, Level::Low);
        self.set(Indicator::Input, Level::Low);
    }

    /// Turn every LED on.
    pub fn set_all(&self) {
        self.set(Indicator::Open, Level::High);
        self.set(Indicator::Lock, Level::High);
        self.set(Indicator::Input, Level::High);
    }

    /// Snapshot of all three LEDs.
    pub fn levels(&self) -> IndicatorLevels {
        IndicatorLevels {
            open: self.get(Indicator::Open),
            lock: self.get(Indicator::Lock),
            input: self.get(Indicator::Input),
        }
    }
}

impl std::fmt::Debug for Indicators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indicators")
            .field("levels", &self.levels())
            .finish()
    }
}
