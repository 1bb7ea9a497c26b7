//! Source payloads.

use serde::{Deserialize, Serialize};

/// Unit of measure accepted for waveform sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOfMeasure {
    /// Standard gravity.
    G,
    /// Metres per second squared.
    Mss,
}

/// Meta information of a waveform source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformSourceMeta {
    /// Where the asset is installed.
    pub location: String,
    /// Monitored asset.
    pub asset_name: String,
    /// Sensor on the asset.
    pub sensor_name: String,
    /// Measured quantity.
    pub measurement_name: String,
    /// Unit of the sample values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measure: Option<UnitOfMeasure>,
}

impl WaveformSourceMeta {
    /// Creates meta information with the required fields.
    pub fn new(
        location: impl Into<String>,
        asset_name: impl Into<String>,
        sensor_name: impl Into<String>,
        measurement_name: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            asset_name: asset_name.into(),
            sensor_name: sensor_name.into(),
            measurement_name: measurement_name.into(),
            unit_of_measure: None,
        }
    }

    /// Sets the unit of measure.
    pub fn with_unit(mut self, unit: UnitOfMeasure) -> Self {
        self.unit_of_measure = Some(unit);
        self
    }
}

/// Payload for creating a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSourceRequest<M = WaveformSourceMeta> {
    /// Caller-chosen identifier, unique per source.
    pub external_id: String,
    /// Class specific meta information.
    pub meta: M,
}

impl<M> CreateSourceRequest<M> {
    /// Creates a new source payload.
    pub fn new(external_id: impl Into<String>, meta: M) -> Self {
        Self {
            external_id: external_id.into(),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_waveform_source_serializes_camel_case() {
        let request = CreateSourceRequest::new(
            "pump-1-de",
            WaveformSourceMeta::new("Plant A", "Pump 1", "DE bearing", "Acceleration")
                .with_unit(UnitOfMeasure::Mss),
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "external_id": "pump-1-de",
                "meta": {
                    "location": "Plant A",
                    "assetName": "Pump 1",
                    "sensorName": "DE bearing",
                    "measurementName": "Acceleration",
                    "unitOfMeasure": "mss"
                }
            })
        );
    }

    #[test]
    fn test_unit_is_optional() {
        let meta = WaveformSourceMeta::new("Plant A", "Fan", "NDE", "Velocity");
        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("unitOfMeasure").is_none());

        let unit: UnitOfMeasure = serde_json::from_str(r#""g""#).unwrap();
        assert_eq!(unit, UnitOfMeasure::G);
    }
}
