use tracing::info;

/// Boolean outputs recomputed from the latest temperature sample. Derivation
/// is stateless: all three are overwritten every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorState {
    /// On above the hot threshold.
    pub hot: bool,
    /// Follows the same hot-threshold condition as `hot`, on its own output.
    pub hot_blink: bool,
    /// On below the cold threshold.
    pub cold: bool,
}

impl IndicatorState {
    pub fn derive(temperature: f64, hot_threshold: f64, cold_threshold: f64) -> Self {
        Self {
            hot: temperature > hot_threshold,
            hot_blink: temperature > hot_threshold,
            cold: temperature < cold_threshold,
        }
    }
}

/// Actuator capability behind the indicator outputs (LED pins on hardware).
/// Applying an unchanged state must be safe.
pub trait IndicatorSink {
    fn apply(&mut self, state: IndicatorState);
}

/// Logs indicator transitions instead of driving pins.
pub struct LogSink {
    last: Option<IndicatorState>,
}

impl LogSink {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl IndicatorSink for LogSink {
    fn apply(&mut self, state: IndicatorState) {
        if self.last != Some(state) {
            info!(
                "Indicators: hot={} blink={} cold={}",
                state.hot, state.hot_blink, state.cold
            );
        }
        self.last = Some(state);
    }
}
