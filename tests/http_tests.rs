//! End-to-end tests against a WireMock server.
//!
//! These exercise the full request/response cycle: URL templates, headers,
//! query parameters, payload encoding, status handling and logging.

use multiviz_client::observability::{LogLevel, Logger};
use multiviz_client::{
    CreateOptions, CreateSourceRequest, MeasurementPage, MultivizClient, MultivizError,
    UnitOfMeasure, WaveformMeasurement, WaveformSourceMeta,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "mv_test_key_12345";

#[derive(Default)]
struct CapturingLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl CapturingLogger {
    fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap().clone()
    }
}

impl Logger for CapturingLogger {
    fn log(&self, level: LogLevel, message: &str, _context: Option<&HashMap<String, String>>) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

fn client_for(server: &MockServer) -> (MultivizClient, Arc<CapturingLogger>) {
    let logger = Arc::new(CapturingLogger::default());
    let client = MultivizClient::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .logger(Arc::clone(&logger) as Arc<dyn Logger>)
        .build()
        .expect("Failed to build client");
    (client, logger)
}

fn waveform_source() -> CreateSourceRequest {
    CreateSourceRequest::new(
        "pump-1-de",
        WaveformSourceMeta::new("Plant A", "Pump 1", "DE bearing", "Acceleration")
            .with_unit(UnitOfMeasure::G),
    )
}

#[tokio::test]
async fn test_create_source_returns_decoded_body() {
    let server = MockServer::start().await;
    let created = json!({"source_id": "s1", "external_id": "pump-1-de"});

    Mock::given(method("POST"))
        .and(path("/sources/"))
        .and(header("X-Vibium-Api-Key", API_KEY))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "external_id": "pump-1-de",
            "meta": {
                "location": "Plant A",
                "assetName": "Pump 1",
                "sensorName": "DE bearing",
                "measurementName": "Acceleration",
                "unitOfMeasure": "g"
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, logger) = client_for(&server);
    let result = client
        .sources()
        .create(&waveform_source(), CreateOptions::default())
        .await
        .unwrap();

    assert_eq!(result, created);
    assert!(logger.lines().is_empty());
}

#[tokio::test]
async fn test_get_unknown_source_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sources/unknown"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Source not found"})))
        .mount(&server)
        .await;

    let (client, logger) = client_for(&server);
    let err = client.sources().get("unknown").await.unwrap_err();

    match &err {
        MultivizError::Http {
            status_code,
            message,
            body,
        } => {
            assert_eq!(*status_code, 404);
            assert_eq!(message, "Source not found");
            assert!(body.contains("Source not found"));
        }
        other => panic!("Expected Http error, got {:?}", other),
    }

    assert_eq!(
        logger.lines(),
        vec![(LogLevel::Error, "HTTP error: 404 - Source not found".to_string())]
    );
}

#[tokio::test]
async fn test_create_source_conflict_returns_existing() {
    let server = MockServer::start().await;
    let existing = json!({"source_id": "s-existing", "external_id": "pump-1-de"});

    Mock::given(method("POST"))
        .and(path("/sources/"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"detail": "Source already exists"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sources/external_id/pump-1-de"))
        .and(header("X-Vibium-Api-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(existing.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, logger) = client_for(&server);
    let result = client
        .sources()
        .create(&waveform_source(), CreateOptions::ignore_existing())
        .await
        .unwrap();

    assert_eq!(result, existing);

    let lines = logger.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].0, LogLevel::Info);
    assert!(lines[1].1.contains("pump-1-de"));
}

#[tokio::test]
async fn test_create_measurement_conflict_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sources/s1/measurements"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Measurement already exists"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, logger) = client_for(&server);
    let measurement = WaveformMeasurement::new(1_700_000_000, 0.25, vec![0.1, 0.2, 0.3]);
    let result = client
        .measurements()
        .create("s1", &measurement, CreateOptions::ignore_existing())
        .await
        .unwrap();

    assert!(result.is_none());
    assert_eq!(
        logger.lines(),
        vec![(
            LogLevel::Warn,
            "Ignored HTTP error: 409 - Measurement already exists".to_string()
        )]
    );
}

#[tokio::test]
async fn test_create_measurement_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sources/s1/measurements"))
        .and(body_json(json!({"timestamp": 1_700_000_000, "duration": 0.5, "data": [1.0, 2.0]})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"timestamp": 1_700_000_000})))
        .mount(&server)
        .await;

    let (client, _logger) = client_for(&server);
    let measurement = WaveformMeasurement::new(1_700_000_000, 0.5, vec![1.0, 2.0]);
    let result = client
        .measurements()
        .create("s1", &measurement, CreateOptions::default())
        .await
        .unwrap();

    assert_eq!(result, Some(json!({"timestamp": 1_700_000_000})));
}

#[tokio::test]
async fn test_list_measurements_sends_default_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sources/s1/measurements"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"timestamp": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _logger) = client_for(&server);
    let result = client
        .measurements()
        .list("s1", MeasurementPage::default())
        .await
        .unwrap();

    assert_eq!(result, json!([{"timestamp": 1}]));
}

#[tokio::test]
async fn test_list_measurements_passes_window_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sources/s1/measurements"))
        .and(query_param("offset", "2000"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _logger) = client_for(&server);
    client
        .measurements()
        .list("s1", MeasurementPage::new(2000, 50))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_measurement_updates_and_deletes() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/sources/s1/measurements/42"))
        .and(body_json(json!({"rpm": 1480})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": "meta"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/sources/s1/measurements/42/scalars"))
        .and(body_json(json!({"rms": 0.2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"updated": "scalars"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/sources/s1/measurements/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _logger) = client_for(&server);
    let measurements = client.measurements();

    assert_eq!(
        measurements.update_meta("s1", 42, &json!({"rpm": 1480})).await.unwrap(),
        json!({"updated": "meta"})
    );
    assert_eq!(
        measurements.update_scalars("s1", 42, &json!({"rms": 0.2})).await.unwrap(),
        json!({"updated": "scalars"})
    );
    assert_eq!(measurements.delete("s1", 42).await.unwrap(), serde_json::Value::Null);
}

#[tokio::test]
async fn test_every_operation_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "Internal Server Error"})))
        .mount(&server)
        .await;

    let (client, logger) = client_for(&server);
    let sources = client.sources();
    let measurements = client.measurements();
    let payload = json!({"external_id": "e1"});

    let results = vec![
        sources.list().await.err(),
        sources.create(&payload, CreateOptions::ignore_existing()).await.err(),
        sources.get("s1").await.err(),
        sources.get_by_external_id("e1").await.err(),
        sources.update("s1", &payload).await.err(),
        sources.delete("s1").await.err(),
        measurements.list("s1", MeasurementPage::default()).await.err(),
        measurements.create("s1", &payload, CreateOptions::ignore_existing()).await.err(),
        measurements.get("s1", 1).await.err(),
        measurements.update_meta("s1", 1, &payload).await.err(),
        measurements.update_scalars("s1", 1, &payload).await.err(),
        measurements.delete("s1", 1).await.err(),
    ];

    for err in &results {
        assert_eq!(err.as_ref().and_then(MultivizError::status_code), Some(500));
    }

    let lines = logger.lines();
    assert_eq!(lines.len(), results.len());
    assert!(lines
        .iter()
        .all(|(level, message)| *level == LogLevel::Error && message.starts_with("HTTP error: 500")));
}

#[tokio::test]
async fn test_validation_errors_are_formatted() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/sources/s1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{
                "type": "enum",
                "loc": ["body", "meta", "unitOfMeasure"],
                "msg": "Input should be 'g' or 'mss'",
                "input": "m/s2",
                "ctx": {"expected": "'g' or 'mss'"}
            }]
        })))
        .mount(&server)
        .await;

    let (client, _logger) = client_for(&server);
    let err = client
        .sources()
        .update("s1", &json!({"meta": {"unitOfMeasure": "m/s2"}}))
        .await
        .unwrap_err();

    let MultivizError::Http { message, .. } = err else {
        panic!("Expected Http error");
    };

    let formatted: serde_json::Value = serde_json::from_str(&message).unwrap();
    assert_eq!(
        formatted,
        json!({
            "detail": [{
                "type": "enum",
                "loc": ["body", "meta", "unitOfMeasure"],
                "msg": "Input should be 'g' or 'mss'",
                "url": "N/A"
            }]
        })
    );
}

#[tokio::test]
async fn test_connection_failure_is_logged_and_returned() {
    let logger = Arc::new(CapturingLogger::default());
    let client = MultivizClient::builder()
        .base_url("http://127.0.0.1:1")
        .api_key(API_KEY)
        .timeout_secs(5)
        .logger(Arc::clone(&logger) as Arc<dyn Logger>)
        .build()
        .unwrap();

    let err = client.sources().list().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status_code(), None);

    let lines = logger.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, LogLevel::Error);
    assert!(lines[0].1.starts_with("Request failed"));
}
