use clap::Parser;
use std::time::Duration;

/// Static device configuration, supplied at startup via flags or environment.
#[derive(Debug, Parser)]
#[command(name = "agent", about = "Temperature/humidity device agent")]
pub struct Config {
    /// Submit endpoint of the ingestion service.
    #[arg(
        long,
        env = "SERVER_URL",
        default_value = "http://localhost:5000/api/reading"
    )]
    pub server_url: String,

    /// Wireless network name.
    #[arg(long, env = "WIFI_SSID", default_value = "monitoring")]
    pub ssid: String,

    /// Wireless network passphrase.
    #[arg(long, env = "WIFI_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Seconds between sampling cycles.
    #[arg(long, env = "SAMPLE_PERIOD_SECS", default_value_t = 10)]
    pub sample_period_secs: u64,

    /// Seconds to wait before sampling again after a sensor fault.
    #[arg(long, env = "SENSOR_RETRY_SECS", default_value_t = 2)]
    pub sensor_retry_secs: u64,

    /// Association attempts per reconnect burst.
    #[arg(long, env = "CONNECT_ATTEMPTS", default_value_t = 20)]
    pub connect_attempts: u32,

    /// Seconds between association attempts.
    #[arg(long, env = "CONNECT_RETRY_SECS", default_value_t = 1)]
    pub connect_retry_secs: u64,

    /// Temperature above which the hot indicators switch on.
    #[arg(long, env = "HOT_THRESHOLD", default_value_t = 25.0)]
    pub hot_threshold: f64,

    /// Temperature below which the cold indicator switches on.
    #[arg(long, env = "COLD_THRESHOLD", default_value_t = 20.0)]
    pub cold_threshold: f64,

    /// Probability that a simulated sensor read fails.
    #[arg(long, env = "SENSOR_FAULT_RATE", default_value_t = 0.05)]
    pub sensor_fault_rate: f64,
}

impl Config {
    pub fn sample_period(&self) -> Duration {
        Duration::from_secs(self.sample_period_secs)
    }

    pub fn sensor_retry(&self) -> Duration {
        Duration::from_secs(self.sensor_retry_secs)
    }

    pub fn connect_retry(&self) -> Duration {
        Duration::from_secs(self.connect_retry_secs)
    }
}
