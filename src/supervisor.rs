//! Wires the lines together and runs both monitors.

use crate::config::MonitorConfig;
use crate::error::Result;
use crate::gpio::{LineProvider, OutputLine};
use crate::monitor::{Indicators, LockMonitor, LockState, ResetMonitor, SharedLockState};
use crate::report::Reporter;
use crate::startup::{run_startup_sequence, STARTUP_STEPS, STARTUP_STEP_DELAY};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Owns the configuration, the line provider and the reporter until the
/// monitors are started.
pub struct Supervisor<P, R> {
    config: MonitorConfig,
    provider: P,
    reporter: Arc<R>,
    state: SharedLockState,
}

impl<P, R> Supervisor<P, R>
where
    P: LineProvider,
    R: Reporter + 'static,
{
    /// Create a supervisor.
    pub fn new(config: MonitorConfig, provider: P, reporter: R) -> Self {
        Self {
            config,
            provider,
            reporter: Arc::new(reporter),
            state: SharedLockState::new(),
        }
    }

    /// Claim every line, run the boot pattern and spawn both monitors.
    ///
    /// Fails only if a line cannot be claimed.
    pub async fn start(self) -> Result<RunningMonitors> {
        let Self {
            config,
            provider,
            reporter,
            state,
        } = self;
        let pins = config.pins;
        pins.validate()?;

        info!(state = %LockState::Unknown, "updating state");
        if let Err(e) = reporter.report(LockState::Unknown).await {
            warn!(error = %e, "could not update lock state");
        }

        let open = provider.output(pins.open_indicator)?;
        let lock = provider.output(pins.lock_indicator)?;
        let input = provider.output(pins.input_indicator)?;
        let sensor = provider.input(pins.lock_sensor)?;
        let button = provider.input(pins.reset_button)?;
        let buzzer = provider.output(pins.buzzer)?;
        debug!(?pins, "lines configured");

        let indicators = Indicators::new(open, lock, input);
        if config.skip_startup {
            indicators.clear_all();
        } else {
            run_startup_sequence(&indicators, STARTUP_STEPS, STARTUP_STEP_DELAY).await;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let reset = ResetMonitor::new(button, indicators.clone(), &config);
        let lock = LockMonitor::new(sensor, indicators.clone(), reporter, state.clone(), &config);

        let reset_task = tokio::spawn(reset.run(shutdown_rx.clone()));
        let lock_task = tokio::spawn(lock.run(shutdown_rx));

        info!(
            refresh_ms = config.refresh.as_millis() as u64,
            reporting = config.reporting_enabled(),
            "monitors started"
        );

        Ok(RunningMonitors {
            shutdown: shutdown_tx,
            lock_task,
            reset_task,
            indicators,
            state,
            _buzzer: Box::new(buzzer),
        })
    }

    /// Start the monitors and keep them running until Ctrl-C.
    pub async fn run_until_signal(self) -> Result<()> {
        let running = self.start().await?;
        info!("ready");

        tokio::signal::ctrl_c().await?;
        info!("received shutdown signal");

        running.shutdown().await;
        Ok(())
    }
}

/// Handle to the spawned monitors.
pub struct RunningMonitors {
    shutdown: watch::Sender<bool>,
    lock_task: JoinHandle<()>,
    reset_task: JoinHandle<()>,
    indicators: Indicators,
    state: SharedLockState,
    // Claimed so it stays driven low for the life of the process
    _buzzer: Box<dyn OutputLine>,
}

impl RunningMonitors {
    /// Indicator LEDs shared by the monitors.
    pub fn indicators(&self) -> &Indicators {
        &self.indicators
    }

    /// Last confirmed lock state.
    pub fn lock_state(&self) -> LockState {
        self.state.get()
    }

    /// Stop both monitors and wait for them to finish their current poll.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);

        for (name, task) in [("lock", self.lock_task), ("reset", self.reset_task)] {
            if let Err(e) = task.await {
                error!(monitor = name, error = %e, "monitor task failed");
            }
        }
        info!("monitors stopped");
    }
}
