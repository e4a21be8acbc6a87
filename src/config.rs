//! Monitor configuration.
//!
//! A [`MonitorConfig`] is built once at startup and handed to every
//! component that needs it. Nothing reads flags or environment variables
//! after that point.

use std::time::Duration;

/// Default lock/button polling interval in milliseconds.
pub const DEFAULT_REFRESH_MS: u64 = 50;

/// Shortest polling interval the monitors will accept.
pub const MIN_REFRESH: Duration = Duration::from_millis(1);

/// Timeout applied to every state report request.
pub const REPORT_TIMEOUT: Duration = Duration::from_secs(30);

/// BCM pin assignments for the indicators, sensor and button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLayout {
    /// "Open" indicator LED
    pub open_indicator: u8,
    /// "Lock" indicator LED
    pub lock_indicator: u8,
    /// "Input" indicator LED
    pub input_indicator: u8,
    /// Door lock sensor (HIGH when locked)
    pub lock_sensor: u8,
    /// Reset push button (HIGH while pressed)
    pub reset_button: u8,
    /// Buzzer, held LOW
    pub buzzer: u8,
}

impl Default for PinLayout {
    fn default() -> Self {
        Self {
            open_indicator: 4,
            lock_indicator: 27,
            input_indicator: 17,
            lock_sensor: 9,
            reset_button: 11,
            buzzer: 18,
        }
    }
}

impl PinLayout {
    /// All pins in the layout, for duplicate detection.
    pub fn all(&self) -> [u8; 6] {
        [
            self.open_indicator,
            self.lock_indicator,
            self.input_indicator,
            self.lock_sensor,
            self.reset_button,
            self.buzzer,
        ]
    }

    /// Ensure no two functions share a pin.
    pub fn validate(&self) -> crate::Result<()> {
        let pins = self.all();
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(crate::OccupiError::config_error(format!(
                    "GPIO pin {} is assigned more than once",
                    pin
                )));
            }
        }
        Ok(())
    }
}

/// Immutable per-process configuration for the monitors and the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Interval between two reads of the same line
    pub refresh: Duration,
    /// Where state changes are POSTed; empty means local only
    pub endpoint: String,
    /// Debug diagnostics
    pub debug: bool,
    /// Verbose diagnostics
    pub verbose: bool,
    /// Pin wiring
    pub pins: PinLayout,
    /// Skip the boot blink pattern
    pub skip_startup: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh: Duration::from_millis(DEFAULT_REFRESH_MS),
            endpoint: String::new(),
            debug: false,
            verbose: false,
            pins: PinLayout::default(),
            skip_startup: false,
        }
    }
}

impl MonitorConfig {
    /// Create a configuration with the given refresh interval and endpoint.
    pub fn new(refresh: Duration, endpoint: impl Into<String>) -> Self {
        Self::default().with_refresh(refresh).with_endpoint(endpoint)
    }

    /// Set the polling interval, clamped to [`MIN_REFRESH`].
    pub fn with_refresh(mut self, refresh: Duration) -> Self {
        self.refresh = refresh.max(MIN_REFRESH);
        self
    }

    /// Set the report endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Enable or disable debug diagnostics.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable or disable verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Override the pin wiring.
    pub fn with_pins(mut self, pins: PinLayout) -> Self {
        self.pins = pins;
        self
    }

    /// Skip or run the boot blink pattern.
    pub fn with_skip_startup(mut self, skip: bool) -> Self {
        self.skip_startup = skip;
        self
    }

    /// Whether any diagnostic output was requested.
    pub fn diagnostics(&self) -> bool {
        self.debug || self.verbose
    }

    /// Whether state changes leave the device.
    pub fn reporting_enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

/// Interpret a string as a boolean flag value.
///
/// Only `t`, `true`, `y` and `yes` (any case) are true.
pub fn str_to_bool(s: &str) -> bool {
    ["t", "true", "y", "yes"]
        .iter()
        .any(|truthy| s.eq_ignore_ascii_case(truthy))
}

/// Read a boolean default from the environment.
pub fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| str_to_bool(&v)).unwrap_or(false)
}
