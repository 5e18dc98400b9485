use crate::config::Config;
use crate::delivery::Delivery;
use crate::indicators::{IndicatorSink, IndicatorState};
use crate::link::{LinkState, WirelessLink};
use crate::sensor::{Sample, Sensor};
use tracing::{debug, info, warn};

/// What a single sampling cycle amounted to. `run` picks the next sleep from
/// this; tests assert on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Sampled, indicators applied, reading delivered.
    Delivered,
    /// Sampled and indicators applied, but the link was down.
    TransmitSkipped,
    /// Sampled and indicators applied; the send failed and the reading is lost.
    DeliveryDropped,
    /// The sensor read failed; nothing else ran this cycle.
    SensorFault,
}

/// The device agent: owns its capabilities and runs the sampling loop.
pub struct Agent<S, L, O> {
    sensor: S,
    link: L,
    outputs: O,
    delivery: Delivery,
    config: Config,
    state: LinkState,
}

impl<S, L, O> Agent<S, L, O>
where
    S: Sensor,
    L: WirelessLink,
    O: IndicatorSink,
{
    pub fn new(sensor: S, link: L, outputs: O, delivery: Delivery, config: Config) -> Self {
        Self {
            sensor,
            link,
            outputs,
            delivery,
            config,
            state: LinkState::Disconnected,
        }
    }

    pub async fn run(mut self) {
        info!(
            "Sampling every {}s, submitting to {}",
            self.config.sample_period_secs, self.config.server_url
        );

        loop {
            let outcome = self.run_cycle().await;

            // A sensor fault shortens the wait; nothing else alters the cadence.
            let delay = match outcome {
                CycleOutcome::SensorFault => self.config.sensor_retry(),
                _ => self.config.sample_period(),
            };
            tokio::time::sleep(delay).await;
        }
    }

    /// One sampling cycle: reconnect if needed, sample, drive the indicators,
    /// and attempt delivery. Every failure mode maps to an outcome; none of
    /// them stops the loop.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        if !self.link.is_connected() {
            self.state = LinkState::Disconnected;
        }
        if self.state != LinkState::Connected {
            self.reconnect().await;
        }

        let sample = match self.sensor.sample() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("Sensor error: {}", e);
                return CycleOutcome::SensorFault;
            }
        };

        info!(
            "Temp: {:.1} C  Humidity: {:.1} %",
            sample.temperature, sample.humidity
        );

        let state = IndicatorState::derive(
            sample.temperature,
            self.config.hot_threshold,
            self.config.cold_threshold,
        );
        self.outputs.apply(state);

        self.transmit(&sample).await
    }

    async fn transmit(&mut self, sample: &Sample) -> CycleOutcome {
        if self.state != LinkState::Connected {
            debug!("Link down, reading not transmitted");
            return CycleOutcome::TransmitSkipped;
        }

        match self.delivery.send(sample).await {
            Ok(()) => CycleOutcome::Delivered,
            Err(e) => {
                // At-most-once delivery: the reading is gone.
                warn!("Delivery failed, reading dropped: {}", e);
                CycleOutcome::DeliveryDropped
            }
        }
    }

    /// One bounded reconnect burst: reset the interface, scan, then a fixed
    /// number of fixed-interval association attempts. Exhaustion leaves the
    /// link down; sampling continues either way.
    async fn reconnect(&mut self) {
        self.state = LinkState::Connecting;
        self.link.reset();

        let visible = self.link.scan();
        info!("Found {} networks", visible.len());
        for entry in &visible {
            debug!(" - SSID: {}, RSSI: {}", entry.ssid, entry.rssi);
        }

        info!("Connecting to wireless network: {}", self.config.ssid);
        for attempt in 1..=self.config.connect_attempts {
            match self
                .link
                .try_associate(&self.config.ssid, &self.config.password)
            {
                Ok(()) => {
                    self.state = LinkState::Connected;
                    info!("Wireless link up after {} attempt(s)", attempt);
                    return;
                }
                Err(e) => {
                    debug!(
                        "Association attempt {}/{} failed: {}",
                        attempt, self.config.connect_attempts, e
                    );
                    // Fixed interval between attempts, no backoff.
                    tokio::time::sleep(self.config.connect_retry()).await;
                }
            }
        }

        self.state = LinkState::Disconnected;
        warn!(
            "Wireless connection failed after {} attempts, transmitting is paused",
            self.config.connect_attempts
        );
    }
}
