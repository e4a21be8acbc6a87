//! Reset button monitor.

use super::edge::EdgeDetector;
use super::indicators::Indicators;
use crate::config::MonitorConfig;
use crate::gpio::{InputLine, Level};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Polls the reset button and turns every LED off on each press.
///
/// Never touches the lock state and never reports.
pub struct ResetMonitor<I> {
    button: I,
    indicators: Indicators,
    edges: EdgeDetector,
    refresh: Duration,
}

impl<I: InputLine> ResetMonitor<I> {
    /// Create a monitor. The button is assumed released until the first edge.
    pub fn new(button: I, indicators: Indicators, config: &MonitorConfig) -> Self {
        Self {
            button,
            indicators,
            edges: EdgeDetector::default(),
            refresh: config.refresh,
        }
    }

    /// Sample the button once; returns the new level on a confirmed edge.
    pub fn poll_once(&mut self) -> Option<Level> {
        self.button.set_pull_down();
        let level = self.edges.observe(self.button.read())?;

        match level {
            Level::High => {
                info!("button down");
                self.indicators.clear_all();
            }
            Level::Low => info!("button up"),
        }

        Some(level)
    }

    /// Poll until `shutdown` flips to true or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        debug!(refresh_ms = self.refresh.as_millis() as u64, "reset monitor started");

        loop {
            self.poll_once();

            tokio::select! {
                _ = tokio::time::sleep(self.refresh) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("reset monitor stopped");
    }
}
