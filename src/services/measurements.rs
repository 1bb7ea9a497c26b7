//! Measurements service.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use super::{measurement_path, measurements_path};
use crate::client::dispatcher::{to_payload, Dispatcher};
use crate::errors::MultivizResult;
use crate::transport::HttpRequest;
use crate::types::options::{CreateOptions, MeasurementPage};

/// Service for measurements nested under a source.
pub struct MeasurementsService {
    dispatcher: Arc<Dispatcher>,
}

impl MeasurementsService {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieves timestamps and measurement data for the source with `source_id`.
    ///
    /// `page` is sent as the `offset`/`limit` query parameters; use
    /// `MeasurementPage::default()` for the first 1000 measurements.
    #[instrument(skip(self))]
    pub async fn list(&self, source_id: &str, page: MeasurementPage) -> MultivizResult<Value> {
        let request = HttpRequest::get(measurements_path(source_id))
            .with_query("offset", page.offset)
            .with_query("limit", page.limit);
        self.dispatcher.execute_json(request, None).await
    }

    /// Adds a measurement to the source with `source_id`.
    ///
    /// With [`CreateOptions::ignore_existing`], a conflict (409) is logged as a
    /// warning and `Ok(None)` is returned; the existing measurement is not
    /// fetched. A conflict whose body is not JSON is still an error.
    #[instrument(skip(self, payload))]
    pub async fn create<P>(
        &self,
        source_id: &str,
        payload: &P,
        options: CreateOptions,
    ) -> MultivizResult<Option<Value>>
    where
        P: Serialize + ?Sized,
    {
        let payload = to_payload(payload)?;
        self.dispatcher
            .execute(
                HttpRequest::post(measurements_path(source_id)),
                Some(&payload),
                options.ignored_statuses(),
            )
            .await
    }

    /// Retrieves the measurement at `timestamp`.
    #[instrument(skip(self))]
    pub async fn get(&self, source_id: &str, timestamp: i64) -> MultivizResult<Value> {
        self.dispatcher
            .execute_json(HttpRequest::get(measurement_path(source_id, timestamp)), None)
            .await
    }

    /// Updates the meta information of the measurement at `timestamp`.
    ///
    /// The captured sample values cannot be changed.
    #[instrument(skip(self, payload))]
    pub async fn update_meta<P>(
        &self,
        source_id: &str,
        timestamp: i64,
        payload: &P,
    ) -> MultivizResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let payload = to_payload(payload)?;
        self.dispatcher
            .execute_json(
                HttpRequest::put(measurement_path(source_id, timestamp)),
                Some(&payload),
            )
            .await
    }

    /// Updates the scalar values of the measurement at `timestamp`.
    #[instrument(skip(self, scalars))]
    pub async fn update_scalars<P>(
        &self,
        source_id: &str,
        timestamp: i64,
        scalars: &P,
    ) -> MultivizResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let scalars = to_payload(scalars)?;
        let path = format!("{}/scalars", measurement_path(source_id, timestamp));
        self.dispatcher
            .execute_json(HttpRequest::put(path), Some(&scalars))
            .await
    }

    /// Deletes the measurement at `timestamp`.
    #[instrument(skip(self))]
    pub async fn delete(&self, source_id: &str, timestamp: i64) -> MultivizResult<Value> {
        self.dispatcher
            .execute_json(HttpRequest::delete(measurement_path(source_id, timestamp)), None)
            .await
    }
}

impl std::fmt::Debug for MeasurementsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasurementsService").finish()
    }
}
