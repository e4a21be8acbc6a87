//! Edge detection between consecutive polls.

use crate::gpio::Level;

/// Remembers the last observed level of one line.
///
/// Only a level that differs from the previous poll is reported. A line that
/// bounces and settles back on the old level between two polls is never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector {
    last: Level,
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new(Level::Low)
    }
}

impl EdgeDetector {
    /// Start with an assumed previous level.
    pub fn new(initial: Level) -> Self {
        Self { last: initial }
    }

    /// Feed one sample; returns the new level on a confirmed edge.
    pub fn observe(&mut self, level: Level) -> Option<Level> {
        if level == self.last {
            return None;
        }
        self.last = level;
        Some(level)
    }

    /// Last observed level.
    pub fn last(&self) -> Level {
        self.last
    }
}
