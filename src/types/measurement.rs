//! Measurement payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A captured waveform measurement.
///
/// Sample values cannot be changed once the measurement is stored; `scalars`
/// and `meta` can be updated separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveformMeasurement {
    /// Capture time.
    pub timestamp: i64,
    /// Capture duration in seconds.
    pub duration: f64,
    /// Captured sample values.
    pub data: Vec<f64>,
    /// Scalar values derived from the waveform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalars: Option<Map<String, Value>>,
    /// Additional meta information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl WaveformMeasurement {
    /// Creates a measurement from its samples.
    pub fn new(timestamp: i64, duration: f64, data: Vec<f64>) -> Self {
        Self {
            timestamp,
            duration,
            data,
            scalars: None,
            meta: None,
        }
    }

    /// Adds a scalar value.
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.scalars
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a meta entry.
    pub fn with_meta(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sample rate implied by the sample count and duration.
    pub fn sample_rate(&self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        let samples = self.data.len() as f64;
        (self.duration > 0.0).then(|| samples / self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measurement_payload() {
        let measurement = WaveformMeasurement::new(1_700_000_000, 0.5, vec![0.1, -0.2, 0.3, 0.0])
            .with_scalar("rms", 0.19)
            .with_meta("rpm", 1480);

        let value = serde_json::to_value(&measurement).unwrap();
        assert_eq!(value["timestamp"], json!(1_700_000_000));
        assert_eq!(value["data"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["scalars"], json!({"rms": 0.19}));
        assert_eq!(value["meta"], json!({"rpm": 1480}));
        assert_eq!(measurement.sample_rate(), Some(8.0));
    }

    #[test]
    fn test_optional_fields_skipped() {
        let measurement = WaveformMeasurement::new(1, 0.0, vec![]);
        let value = serde_json::to_value(&measurement).unwrap();

        assert!(value.get("scalars").is_none());
        assert!(value.get("meta").is_none());
        assert_eq!(measurement.sample_rate(), None);
    }
}
