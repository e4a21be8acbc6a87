use occupi::{
    gpio::mock::{MockInput, MockLineProvider},
    EdgeDetector, Indicator, IndicatorLevels, Indicators, Level, LineProvider, LockMonitor,
    LockState, MonitorConfig, NoopReporter, ResetMonitor, SharedLockState, StateChange,
};
use std::sync::Arc;
use std::time::Duration;

const OPEN: u8 = 4;
const LOCK: u8 = 27;
const INPUT: u8 = 17;
const SENSOR: u8 = 9;
const BUTTON: u8 = 11;

struct Rig {
    provider: MockLineProvider,
    indicators: Indicators,
    state: SharedLockState,
    lock: LockMonitor<MockInput, NoopReporter>,
    reset: ResetMonitor<MockInput>,
}

fn rig() -> Rig {
    let provider = MockLineProvider::new();
    let config = MonitorConfig::default();
    let indicators = Indicators::new(
        provider.output(OPEN).unwrap(),
        provider.output(LOCK).unwrap(),
        provider.output(INPUT).unwrap(),
    );
    let state = SharedLockState::new();
    let lock = LockMonitor::new(
        provider.input(SENSOR).unwrap(),
        indicators.clone(),
        Arc::new(NoopReporter),
        state.clone(),
        &config,
    );
    let reset = ResetMonitor::new(provider.input(BUTTON).unwrap(), indicators.clone(), &config);

    Rig {
        provider,
        indicators,
        state,
        lock,
        reset,
    }
}

/// Test that the lock state always tracks the last confirmed sensor level
#[tokio::test]
async fn test_lock_state_tracks_last_edge() {
    let mut rig = rig();
    let levels = [
        Level::High,
        Level::High,
        Level::Low,
        Level::High,
        Level::Low,
        Level::Low,
        Level::Low,
        Level::High,
    ];
    rig.provider.push_inputs(SENSOR, levels);

    let mut last = None;
    for level in levels {
        if let Some(state) = rig.lock.poll_once().await {
            assert_eq!(state, LockState::from(level));
            last = Some(state);
        }
        if let Some(state) = last {
            assert_eq!(rig.state.get(), state);
        }
    }
    assert_eq!(rig.state.get(), LockState::Locked);
}

/// Test the LED invariant after every lock edge
#[tokio::test]
async fn test_indicators_are_function_of_lock_state() {
    let mut rig = rig();
    rig.provider
        .push_inputs(SENSOR, [Level::High, Level::Low, Level::High, Level::Low]);

    for _ in 0..4 {
        let state = rig.lock.poll_once().await.unwrap();
        let levels = rig.indicators.levels();
        match state {
            LockState::Locked => {
                assert_eq!(levels.open, Level::Low);
                assert_eq!(levels.lock, Level::High);
            }
            LockState::Unlocked => {
                assert_eq!(levels.open, Level::High);
                assert_eq!(levels.lock, Level::Low);
            }
            LockState::Unknown => panic!("monitor never produces Unknown"),
        }
    }
}

/// Test that a button press clears LEDs but leaves the lock state alone
#[tokio::test]
async fn test_reset_press_does_not_touch_lock_state() {
    let mut rig = rig();
    rig.provider.set_input(SENSOR, Level::High);
    rig.lock.poll_once().await;
    rig.indicators.set(Indicator::Input, Level::High);

    rig.provider.set_input(BUTTON, Level::High);
    assert_eq!(rig.reset.poll_once(), Some(Level::High));

    assert_eq!(rig.indicators.levels(), IndicatorLevels::OFF);
    assert_eq!(rig.state.get(), LockState::Locked);
}

/// Test that a later lock edge overwrites a reset (last writer wins)
#[tokio::test]
async fn test_lock_edge_after_reset_relights() {
    let mut rig = rig();
    rig.provider.set_input(BUTTON, Level::High);
    rig.reset.poll_once();

    rig.provider.set_input(SENSOR, Level::High);
    rig.lock.poll_once().await;

    assert_eq!(rig.indicators.get(Indicator::Lock), Level::High);
    assert_eq!(rig.indicators.get(Indicator::Input), Level::Low);
}

/// Test that a bounce shorter than one poll is never seen
#[test]
fn test_bounce_between_polls_is_absorbed() {
    let mut detector = EdgeDetector::default();
    // The line went HIGH and back to LOW between these two samples.
    assert_eq!(detector.observe(Level::Low), None);
    assert_eq!(detector.observe(Level::Low), None);
    // A level that holds for one poll is an edge straight away.
    assert_eq!(detector.observe(Level::High), Some(Level::High));
}

/// Test the wire record for every lock state
#[test]
fn test_state_change_serialization() {
    let json = serde_json::to_string(&StateChange::from(LockState::Locked)).unwrap();
    assert_eq!(json, r#"{"state":"occupied"}"#);

    let parsed: StateChange = serde_json::from_str(r#"{"state":"available"}"#).unwrap();
    assert_eq!(parsed, StateChange::from(LockState::Unlocked));

    let json = serde_json::to_string(&StateChange::from(LockState::Unknown)).unwrap();
    assert_eq!(json, r#"{"state":"unknown"}"#);
}

/// Test configuration clamping and builders
#[test]
fn test_monitor_config() {
    let config = MonitorConfig::new(Duration::ZERO, "http://example.invalid/state")
        .with_verbose(true);

    assert_eq!(config.refresh, Duration::from_millis(1));
    assert!(config.reporting_enabled());
    assert!(config.diagnostics());
    assert!(!config.debug);
}
