//! # Occupi - Raspberry Pi Door Lock Monitor
//!
//! Watches a door lock sensor and a reset button wired to a Raspberry Pi,
//! drives three indicator LEDs, and reports lock/unlock transitions to a
//! remote service over HTTP.
//!
//! ## Features
//!
//! - **Debounced polling**: only level changes between two polls count
//! - **Indicator LEDs**: open/lock LEDs follow the lock state, a reset button clears them
//! - **Best-effort reporting**: one JSON POST per transition, no retries
//! - **Cross-compilation**: real GPIO behind the `gpio` feature, in-memory lines for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use occupi::{DefaultLineProvider, HttpReporter, MonitorConfig, Supervisor};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MonitorConfig::new(Duration::from_millis(50), "http://door.local/state");
//!     let reporter = HttpReporter::new(&config)?;
//!     let lines = DefaultLineProvider::new()?;
//!
//!     Supervisor::new(config, lines, reporter).run_until_signal().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gpio;
pub mod monitor;
pub mod report;
pub mod startup;
pub mod supervisor;

// Re-export public API
pub use config::{MonitorConfig, PinLayout};
pub use error::{OccupiError, ReportError, Result};
pub use gpio::{DefaultLineProvider, InputLine, Level, LineProvider, OutputLine};
pub use monitor::{
    EdgeDetector, Indicator, IndicatorLevels, Indicators, LockMonitor, LockState, ResetMonitor,
    SharedLockState,
};
pub use report::{HttpReporter, NoopReporter, Reporter, StateChange};
pub use supervisor::{RunningMonitors, Supervisor};

pub use config::DEFAULT_REFRESH_MS;
