//! Boot blink pattern on the indicator LEDs.

use crate::monitor::{Indicator, Indicators};
use std::time::Duration;
use tracing::debug;

/// Number of toggles in the boot pattern.
pub const STARTUP_STEPS: usize = 20;

/// Delay after each toggle.
pub const STARTUP_STEP_DELAY: Duration = Duration::from_millis(75);

/// Light every LED, then walk a toggle across open, lock and input for
/// `steps` steps. Always leaves every LED off.
pub async fn run_startup_sequence(indicators: &Indicators, steps: usize, delay: Duration) {
    debug!(steps, "running startup sequence");
    indicators.set_all();

    for i in 0..steps {
        let which = match i % 3 {
            0 => Indicator::Open,
            1 => Indicator::Lock,
            _ => Indicator::Input,
        };
        indicators.toggle(which);
        tokio::time::sleep(delay).await;
    }

    indicators.clear_all();
}
