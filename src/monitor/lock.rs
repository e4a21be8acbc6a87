//! Lock sensor monitor.

use super::edge::EdgeDetector;
use super::indicators::{Indicator, Indicators};
use super::state::{LockState, SharedLockState};
use crate::config::MonitorConfig;
use crate::gpio::{InputLine, Level};
use crate::report::Reporter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Polls the lock sensor and keeps the lock state, the open/lock LEDs and
/// the remote service in step with every confirmed edge.
pub struct LockMonitor<I, R> {
    sensor: I,
    indicators: Indicators,
    reporter: Arc<R>,
    state: SharedLockState,
    edges: EdgeDetector,
    refresh: Duration,
}

impl<I, R> LockMonitor<I, R>
where
    I: InputLine,
    R: Reporter,
{
    /// Create a monitor. The sensor is assumed LOW until the first edge.
    pub fn new(
        sensor: I,
        indicators: Indicators,
        reporter: Arc<R>,
        state: SharedLockState,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            sensor,
            indicators,
            reporter,
            state,
            edges: EdgeDetector::default(),
            refresh: config.refresh,
        }
    }

    /// Sample the sensor once and act on a confirmed edge.
    ///
    /// LEDs and lock state are updated before the report is attempted; a
    /// failed report is logged and otherwise ignored.
    pub async fn poll_once(&mut self) -> Option<LockState> {
        self.sensor.set_pull_down();
        let level = self.edges.observe(self.sensor.read())?;

        match level {
            Level::High => info!("lock down"),
            Level::Low => info!("lock up"),
        }

        let state = LockState::from(level);
        self.indicators.show(state);
        self.state.set(state);

        info!(%state, "updating state");
        if let Err(e) = self.reporter.report(state).await {
            warn!(%state, error = %e, "could not update lock state");
        }

        Some(state)
    }

    /// Poll until `shutdown` flips to true or its sender is dropped.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        // Matches the initial LOW assumption until the sensor says otherwise.
        self.indicators.set(Indicator::Open, Level::High);
        debug!(refresh_ms = self.refresh.as_millis() as u64, "lock monitor started");

        loop {
            self.poll_once().await;

            tokio::select! {
                _ = tokio::time::sleep(self.refresh) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("lock monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::gpio::mock::MockLineProvider;
    use crate::gpio::LineProvider;
    use crate::monitor::IndicatorLevels;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<LockState>>,
        fail: bool,
    }

    impl Reporter for Recorder {
        async fn report(&self, state: LockState) -> Result<(), ReportError> {
            self.calls.lock().unwrap().push(state);
            if self.fail {
                Err(ReportError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
            } else {
                Ok(())
            }
        }
    }

    fn monitor(
        provider: &MockLineProvider,
        reporter: Arc<Recorder>,
    ) -> (LockMonitor<crate::gpio::mock::MockInput, Recorder>, Indicators, SharedLockState) {
        let indicators = Indicators::new(
            provider.output(4).unwrap(),
            provider.output(27).unwrap(),
            provider.output(17).unwrap(),
        );
        let state = SharedLockState::new();
        let monitor = LockMonitor::new(
            provider.input(9).unwrap(),
            indicators.clone(),
            reporter,
            state.clone(),
            &MonitorConfig::default(),
        );
        (monitor, indicators, state)
    }

    #[tokio::test]
    async fn test_level_sequence_produces_two_edges() {
        let provider = MockLineProvider::new();
        provider.push_inputs(9, [Level::Low, Level::Low, Level::High, Level::High, Level::Low]);
        let reporter = Arc::new(Recorder::default());
        let (mut monitor, _indicators, state) = monitor(&provider, reporter.clone());

        let mut edges = Vec::new();
        for _ in 0..5 {
            edges.push(monitor.poll_once().await);
        }

        assert_eq!(
            edges,
            vec![None, None, Some(LockState::Locked), None, Some(LockState::Unlocked)]
        );
        assert_eq!(
            *reporter.calls.lock().unwrap(),
            vec![LockState::Locked, LockState::Unlocked]
        );
        assert_eq!(state.get(), LockState::Unlocked);
    }

    #[tokio::test]
    async fn test_indicators_follow_state() {
        let provider = MockLineProvider::new();
        provider.set_input(9, Level::High);
        let (mut monitor, indicators, state) = monitor(&provider, Arc::new(Recorder::default()));

        assert_eq!(monitor.poll_once().await, Some(LockState::Locked));
        assert_eq!(state.get(), LockState::Locked);
        assert_eq!(indicators.get(Indicator::Open), Level::Low);
        assert_eq!(indicators.get(Indicator::Lock), Level::High);

        provider.set_input(9, Level::Low);
        assert_eq!(monitor.poll_once().await, Some(LockState::Unlocked));
        assert_eq!(indicators.get(Indicator::Open), Level::High);
        assert_eq!(indicators.get(Indicator::Lock), Level::Low);
    }

    #[tokio::test]
    async fn test_report_failure_keeps_local_state() {
        let provider = MockLineProvider::new();
        provider.set_input(9, Level::High);
        let reporter = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let (mut monitor, indicators, state) = monitor(&provider, reporter.clone());

        assert_eq!(monitor.poll_once().await, Some(LockState::Locked));
        assert_eq!(state.get(), LockState::Locked);
        assert_eq!(
            indicators.levels(),
            IndicatorLevels {
                open: Level::Low,
                lock: Level::High,
                input: Level::Low,
            }
        );

        // No retry on the following polls.
        assert_eq!(monitor.poll_once().await, None);
        assert_eq!(reporter.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_pull_down_reasserted_every_poll() {
        let provider = MockLineProvider::new();
        let (mut monitor, _, _) = monitor(&provider, Arc::new(Recorder::default()));
        let before = provider.pull_down_count(9);

        for _ in 0..3 {
            monitor.poll_once().await;
        }
        assert_eq!(provider.pull_down_count(9), before + 3);
        assert_eq!(provider.read_count(9), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_stops_on_shutdown() {
        let provider = MockLineProvider::new();
        let (monitor, indicators, _) = monitor(&provider, Arc::new(Recorder::default()));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(monitor.run(rx));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(indicators.get(Indicator::Open), Level::High);

        tx.send(true).unwrap();
        handle.await.unwrap();
        assert!(provider.read_count(9) >= 10);
    }
}
