//! In-memory lines for hosts without GPIO and for tests.
//!
//! All lines handed out by one [`MockLineProvider`] share a single board, so
//! the provider can be cloned and kept around to script input levels and
//! inspect what the monitors drove onto the outputs.

use super::{InputLine, Level, LineProvider, OutputLine};
use crate::error::{OccupiError, Result};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Board {
    // Pending scripted samples per input pin
    scripts: HashMap<u8, VecDeque<Level>>,
    // Level an input keeps reporting once its script is exhausted
    steady: HashMap<u8, Level>,
    outputs: HashMap<u8, Level>,
    writes: Vec<(u8, Level)>,
    reads: HashMap<u8, usize>,
    pull_downs: HashMap<u8, usize>,
    claimed: HashSet<u8>,
    unavailable: bool,
}

/// Mock line provider backed by a shared in-memory board.
#[derive(Debug, Clone, Default)]
pub struct MockLineProvider {
    board: Arc<Mutex<Board>>,
}

impl MockLineProvider {
    /// Create a board where every line reads LOW.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board whose lines can never be claimed, like a host without
    /// a GPIO peripheral.
    pub fn unavailable() -> Self {
        let provider = Self::default();
        provider.board().unavailable = true;
        provider
    }

    fn board(&self) -> MutexGuard<'_, Board> {
        self.board.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue samples for an input pin. Each read consumes one; the last
    /// sample keeps being returned afterwards.
    pub fn push_inputs(&self, pin: u8, levels: impl IntoIterator<Item = Level>) {
        self.board().scripts.entry(pin).or_default().extend(levels);
    }

    /// Hold an input pin at `level`, discarding any queued samples.
    pub fn set_input(&self, pin: u8, level: Level) {
        let mut board = self.board();
        board.scripts.remove(&pin);
        board.steady.insert(pin, level);
    }

    /// Level an output pin is currently driven to.
    pub fn output_level(&self, pin: u8) -> Option<Level> {
        self.board().outputs.get(&pin).copied()
    }

    /// Every output write in the order it happened.
    pub fn writes(&self) -> Vec<(u8, Level)> {
        self.board().writes.clone()
    }

    /// Number of samples taken from an input pin.
    pub fn read_count(&self, pin: u8) -> usize {
        self.board().reads.get(&pin).copied().unwrap_or(0)
    }

    /// Number of times the pull-down bias was applied to an input pin.
    pub fn pull_down_count(&self, pin: u8) -> usize {
        self.board().pull_downs.get(&pin).copied().unwrap_or(0)
    }

    fn claim(&self, pin: u8) -> Result<()> {
        let mut board = self.board();
        if board.unavailable {
            return Err(OccupiError::gpio_error(format!(
                "GPIO not available on this system (attempted to claim pin {})",
                pin
            )));
        }
        if !board.claimed.insert(pin) {
            return Err(OccupiError::gpio_error(format!(
                "Failed to claim pin {}: pin already in use",
                pin
            )));
        }
        Ok(())
    }
}

impl LineProvider for MockLineProvider {
    type Input = MockInput;
    type Output = MockOutput;

    fn input(&self, pin: u8) -> Result<MockInput> {
        self.claim(pin)?;
        *self.board().pull_downs.entry(pin).or_default() += 1;

        Ok(MockInput {
            pin,
            board: Arc::clone(&self.board),
        })
    }

    fn output(&self, pin: u8) -> Result<MockOutput> {
        self.claim(pin)?;
        self.board().outputs.insert(pin, Level::Low);

        Ok(MockOutput {
            pin,
            board: Arc::clone(&self.board),
        })
    }
}

/// Input line on the mock board.
#[derive(Debug)]
pub struct MockInput {
    pin: u8,
    board: Arc<Mutex<Board>>,
}

impl InputLine for MockInput {
    fn set_pull_down(&mut self) {
        let mut board = self.board.lock().unwrap_or_else(|p| p.into_inner());
        *board.pull_downs.entry(self.pin).or_default() += 1;
    }

    fn read(&mut self) -> Level {
        let mut board = self.board.lock().unwrap_or_else(|p| p.into_inner());
        *board.reads.entry(self.pin).or_default() += 1;

        let next = board.scripts.get_mut(&self.pin).and_then(VecDeque::pop_front);
        match next {
            Some(level) => {
                board.steady.insert(self.pin, level);
                level
            }
            None => board.steady.get(&self.pin).copied().unwrap_or(Level::Low),
        }
    }
}

/// Output line on the mock board.
#[derive(Debug)]
pub struct MockOutput {
    pin: u8,
    board: Arc<Mutex<Board>>,
}

impl OutputLine for MockOutput {
    fn write(&mut self, level: Level) {
        let mut board = self.board.lock().unwrap_or_else(|p| p.into_inner());
        board.outputs.insert(self.pin, level);
        board.writes.push((self.pin, level));
    }

    fn level(&self) -> Level {
        let board = self.board.lock().unwrap_or_else(|p| p.into_inner());
        board.outputs.get(&self.pin).copied().unwrap_or(Level::Low)
    }
}
