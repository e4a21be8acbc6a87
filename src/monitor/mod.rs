//! Debounced monitoring of the lock sensor and the reset button.
//!
//! Two independent polling loops run side by side. Each keeps its own last
//! observed level and only acts when a poll differs from the previous one.
//! Both write to the same indicator LEDs without coordinating with each
//! other.

pub mod edge;
pub mod indicators;
pub mod lock;
pub mod reset;
pub mod state;

// Re-export commonly used items
pub use edge::EdgeDetector;
pub use indicators::{Indicator, IndicatorLevels, Indicators};
pub use lock::LockMonitor;
pub use reset::ResetMonitor;
pub use state::{LockState, SharedLockState};
