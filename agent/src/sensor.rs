use rand::Rng;
use thiserror::Error;

/// One temperature/humidity measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Error)]
#[error("sensor read failed: {0}")]
pub struct SensorError(pub String);

/// Environment sensor capability. A read yields a complete sample or fails;
/// failures are transient and the caller retries on a later cycle.
pub trait Sensor {
    fn sample(&mut self) -> Result<Sample, SensorError>;
}

/// Software stand-in for a DHT-class sensor so the agent can run without
/// hardware. Values stay inside the plausible indoor range; a read
/// occasionally fails.
pub struct SimulatedSensor {
    fault_rate: f64,
}

impl SimulatedSensor {
    pub fn new(fault_rate: f64) -> Self {
        Self {
            fault_rate: fault_rate.clamp(0.0, 1.0),
        }
    }
}

impl Sensor for SimulatedSensor {
    fn sample(&mut self) -> Result<Sample, SensorError> {
        let mut rng = rand::thread_rng();

        if rng.gen_bool(self.fault_rate) {
            return Err(SensorError("checksum mismatch".to_string()));
        }

        Ok(Sample {
            temperature: rng.gen_range(15.0..35.0),
            humidity: rng.gen_range(30.0..80.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faultless_sensor_always_samples() {
        let mut sensor = SimulatedSensor::new(0.0);

        for _ in 0..100 {
            let sample = sensor.sample().unwrap();
            assert!((15.0..35.0).contains(&sample.temperature));
            assert!((30.0..80.0).contains(&sample.humidity));
        }
    }

    #[test]
    fn test_saturated_fault_rate_always_fails() {
        let mut sensor = SimulatedSensor::new(1.0);

        assert!(sensor.sample().is_err());
    }

    #[test]
    fn test_fault_rate_is_clamped() {
        let mut sensor = SimulatedSensor::new(7.5);

        assert!(sensor.sample().is_err());
    }
}
