//! Sources service.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

use super::{source_path, SOURCES_PATH};
use crate::client::dispatcher::{to_payload, Dispatcher};
use crate::errors::MultivizResult;
use crate::transport::HttpRequest;
use crate::types::options::CreateOptions;

/// Service for the `/sources/` resource.
pub struct SourcesService {
    dispatcher: Arc<Dispatcher>,
}

impl SourcesService {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Lists all sources with their source IDs.
    #[instrument(skip(self))]
    pub async fn list(&self) -> MultivizResult<Value> {
        self.dispatcher
            .execute_json(HttpRequest::get(SOURCES_PATH), None)
            .await
    }

    /// Creates a source.
    ///
    /// Waveform sources need `location`, `assetName`, `sensorName` and
    /// `measurementName` in their meta, see
    /// [`WaveformSourceMeta`](crate::types::source::WaveformSourceMeta).
    ///
    /// With [`CreateOptions::ignore_existing`], a conflict (409) is answered
    /// by fetching the existing source through the payload's `external_id`.
    /// Without an `external_id` in the payload the conflict is returned.
    #[instrument(skip(self, payload))]
    pub async fn create<P>(&self, payload: &P, options: CreateOptions) -> MultivizResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let payload = to_payload(payload)?;

        match self
            .dispatcher
            .execute_json(HttpRequest::post(SOURCES_PATH), Some(&payload))
            .await
        {
            Err(err) if err.is_conflict() && options.ignore_existing => {
                let Some(external_id) = external_id_of(&payload) else {
                    return Err(err);
                };
                self.dispatcher.logger().info(&format!(
                    "Source with external_id '{}' already exists. Ignoring as per flag.",
                    external_id
                ));
                self.get_by_external_id(&external_id).await
            }
            result => result,
        }
    }

    /// Retrieves the source with `source_id`.
    #[instrument(skip(self))]
    pub async fn get(&self, source_id: &str) -> MultivizResult<Value> {
        self.dispatcher
            .execute_json(HttpRequest::get(source_path(source_id)), None)
            .await
    }

    /// Retrieves the source registered under `external_id`.
    #[instrument(skip(self))]
    pub async fn get_by_external_id(&self, external_id: &str) -> MultivizResult<Value> {
        let path = format!("/sources/external_id/{}", external_id);
        self.dispatcher
            .execute_json(HttpRequest::get(path), None)
            .await
    }

    /// Updates the meta information of the source with `source_id`.
    #[instrument(skip(self, payload))]
    pub async fn update<P>(&self, source_id: &str, payload: &P) -> MultivizResult<Value>
    where
        P: Serialize + ?Sized,
    {
        let payload = to_payload(payload)?;
        self.dispatcher
            .execute_json(HttpRequest::put(source_path(source_id)), Some(&payload))
            .await
    }

    /// Deletes the source with `source_id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, source_id: &str) -> MultivizResult<Value> {
        self.dispatcher
            .execute_json(HttpRequest::delete(source_path(source_id)), None)
            .await
    }
}

fn external_id_of(payload: &Value) -> Option<String> {
    match payload.get("external_id")? {
        Value::Null => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}

impl std::fmt::Debug for SourcesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourcesService").finish()
    }
}
