//! Lock state and its process-wide last known value.

use crate::gpio::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// State of the door lock as derived from the sensor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LockState {
    /// Sensor reads HIGH
    Locked,
    /// Sensor reads LOW
    Unlocked,
    /// No confirmed reading yet
    #[default]
    Unknown,
}

impl LockState {
    /// Name used for this state on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            LockState::Locked => "occupied",
            LockState::Unlocked => "available",
            LockState::Unknown => "unknown",
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            LockState::Locked => 0,
            LockState::Unlocked => 1,
            LockState::Unknown => 2,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => LockState::Locked,
            1 => LockState::Unlocked,
            _ => LockState::Unknown,
        }
    }
}

impl From<Level> for LockState {
    fn from(level: Level) -> Self {
        match level {
            Level::High => LockState::Locked,
            Level::Low => LockState::Unlocked,
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Locked => f.write_str("LOCKED"),
            LockState::Unlocked => f.write_str("UNLOCKED"),
            LockState::Unknown => f.write_str("UNKNOWN"),
        }
    }
}

/// Last confirmed lock state, readable from anywhere.
///
/// Only the lock monitor writes it.
#[derive(Debug, Clone)]
pub struct SharedLockState {
    inner: Arc<AtomicU8>,
}

impl Default for SharedLockState {
    fn default() -> Self {
        Self {
            inner: Arc::new(AtomicU8::new(LockState::Unknown.to_u8())),
        }
    }
}

impl SharedLockState {
    /// Start out as [`LockState::Unknown`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    pub fn get(&self) -> LockState {
        LockState::from_u8(self.inner.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: LockState) {
        self.inner.store(state.to_u8(), Ordering::Release);
    }
}
