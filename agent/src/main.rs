mod agent;
mod config;
mod delivery;
mod indicators;
mod link;
mod sensor;

use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = config::Config::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting device agent");

    let delivery = match delivery::Delivery::new(&config.server_url) {
        Ok(delivery) => delivery,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let agent = agent::Agent::new(
        sensor::SimulatedSensor::new(config.sensor_fault_rate),
        link::HostLink,
        indicators::LogSink::new(),
        delivery,
        config,
    );

    agent.run().await;
}
