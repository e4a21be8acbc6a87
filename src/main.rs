//! Occupi - Raspberry Pi Door Lock Monitor Binary
//!
//! Watches the lock sensor and reset button until interrupted.

use anyhow::Context;
use clap::{ArgAction, Parser};
use occupi::config::env_flag;
use occupi::{
    DefaultLineProvider, HttpReporter, MonitorConfig, PinLayout, Supervisor, DEFAULT_REFRESH_MS,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "occupi")]
#[command(about = "🚪 Occupi - Raspberry Pi door lock monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Monitors a door lock sensor, drives indicator LEDs and reports lock state changes over HTTP")]
struct Cli {
    /// GPIO pin refresh rate in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_REFRESH_MS)]
    refresh: u64,

    /// The endpoint to send lock state updates to. If omitted, updates are local only.
    #[arg(short, long, default_value = "")]
    endpoint: String,

    /// Enable debugging mode [env: DEBUG]
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = env_flag("DEBUG")
    )]
    debug: bool,

    /// Enable verbose debugging mode [env: VERBOSE]
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = env_flag("VERBOSE")
    )]
    verbose: bool,

    /// Skip the boot blink pattern
    #[arg(long)]
    skip_startup: bool,

    /// BCM pin of the "open" indicator LED
    #[arg(long, default_value_t = PinLayout::default().open_indicator)]
    open_pin: u8,

    /// BCM pin of the "lock" indicator LED
    #[arg(long, default_value_t = PinLayout::default().lock_indicator)]
    lock_pin: u8,

    /// BCM pin of the "input" indicator LED
    #[arg(long, default_value_t = PinLayout::default().input_indicator)]
    input_pin: u8,

    /// BCM pin of the door lock sensor
    #[arg(long, default_value_t = PinLayout::default().lock_sensor)]
    sensor_pin: u8,

    /// BCM pin of the reset button
    #[arg(long, default_value_t = PinLayout::default().reset_button)]
    button_pin: u8,

    /// BCM pin of the buzzer (held low)
    #[arg(long, default_value_t = PinLayout::default().buzzer)]
    buzzer_pin: u8,
}

impl Cli {
    fn to_config(&self) -> MonitorConfig {
        let pins = PinLayout {
            open_indicator: self.open_pin,
            lock_indicator: self.lock_pin,
            input_indicator: self.input_pin,
            lock_sensor: self.sensor_pin,
            reset_button: self.button_pin,
            buzzer: self.buzzer_pin,
        };

        MonitorConfig::new(Duration::from_millis(self.refresh), self.endpoint.clone())
            .with_debug(self.debug)
            .with_verbose(self.verbose)
            .with_pins(pins)
            .with_skip_startup(self.skip_startup)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    println!(">>> Starting.");

    let config = cli.to_config();
    info!("Configuration:");
    info!("  - Refresh: {}ms", config.refresh.as_millis());
    info!(
        "  - Endpoint: {}",
        if config.reporting_enabled() {
            config.endpoint.as_str()
        } else {
            "(local only)"
        }
    );

    let reporter = HttpReporter::new(&config)?;
    let lines = open_lines()?;

    Supervisor::new(config, lines, reporter)
        .run_until_signal()
        .await
        .context("Lock monitor stopped with an error")?;

    Ok(())
}

fn open_lines() -> anyhow::Result<DefaultLineProvider> {
    DefaultLineProvider::new().context("Could not open GPIO")
}

/// Default filter directive; dependencies stay at ERROR either way.
fn log_directive(debug: bool, verbose: bool) -> &'static str {
    // State changes are INFO and report failures WARN, so nothing but fatal
    // errors is printed unless a diagnostics flag is set.
    if debug {
        "error,occupi=debug"
    } else if verbose {
        "error,occupi=info"
    } else {
        "error"
    }
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let directive = log_directive(cli.debug, cli.verbose);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
