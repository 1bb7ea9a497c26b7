//! Request dispatch shared by all services.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::errors::{format_error_body, MultivizError, MultivizResult};
use crate::observability::{LogLevel, Logger};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// Performs one HTTP request and applies the MultiViz status semantics.
///
/// Every request carries the API key and a JSON content type. A status from
/// the caller's ignore list is logged as a warning and yields `Ok(None)`; any
/// other non-2xx status is logged as an error and returned as
/// [`MultivizError::Http`].
pub(crate) struct Dispatcher {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    logger: Arc<dyn Logger>,
    custom_headers: Vec<(String, String)>,
}

impl Dispatcher {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthProvider>,
        logger: Arc<dyn Logger>,
        custom_headers: Vec<(String, String)>,
    ) -> Self {
        Self {
            transport,
            auth,
            logger,
            custom_headers,
        }
    }

    pub(crate) fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Dispatches a request whose failures all propagate.
    pub(crate) async fn execute_json(
        &self,
        request: HttpRequest,
        payload: Option<&Value>,
    ) -> MultivizResult<Value> {
        Ok(self
            .execute(request, payload, &[])
            .await?
            .unwrap_or(Value::Null))
    }

    /// Dispatches a request, treating `ignored_statuses` as "no data".
    pub(crate) async fn execute(
        &self,
        request: HttpRequest,
        payload: Option<&Value>,
        ignored_statuses: &[u16],
    ) -> MultivizResult<Option<Value>> {
        let request = self.prepare(request, payload)?;
        let method = request.method;
        let path = request.path.clone();

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                self.log(
                    LogLevel::Error,
                    &format!("Request failed: {}", err),
                    method.as_str(),
                    &path,
                    None,
                );
                return Err(err.into());
            }
        };

        if ignored_statuses.contains(&response.status) {
            let detail = match format_error_body(&response.text()) {
                Ok(detail) => detail,
                Err(err) => {
                    self.log(
                        LogLevel::Error,
                        &format!("Failed to decode error body: {} - {}", response.status, err),
                        method.as_str(),
                        &path,
                        Some(response.status),
                    );
                    return Err(err);
                }
            };
            self.log(
                LogLevel::Warn,
                &format!("Ignored HTTP error: {} - {}", response.status, detail),
                method.as_str(),
                &path,
                Some(response.status),
            );
            return Ok(None);
        }

        if !response.is_success() {
            let error = MultivizError::http(response.status, response.text());
            if let MultivizError::Http { message, .. } = &error {
                self.log(
                    LogLevel::Error,
                    &format!("HTTP error: {} - {}", response.status, message),
                    method.as_str(),
                    &path,
                    Some(response.status),
                );
            }
            return Err(error);
        }

        self.decode(&response).map(Some).map_err(|err| {
            self.log(
                LogLevel::Error,
                &format!("Failed to decode response: {}", err),
                method.as_str(),
                &path,
                Some(response.status),
            );
            err
        })
    }

    fn prepare(&self, mut request: HttpRequest, payload: Option<&Value>) -> MultivizResult<HttpRequest> {
        for (name, value) in &self.custom_headers {
            request.headers.insert(name.clone(), value.clone());
        }
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.auth.apply_auth(&mut request.headers);

        if let Some(payload) = payload {
            request.body = Some(serde_json::to_vec(payload)?);
        }

        Ok(request)
    }

    /// Decodes a successful response. An empty body decodes to `null`.
    fn decode(&self, response: &HttpResponse) -> MultivizResult<Value> {
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(response.json()?)
    }

    fn log(&self, level: LogLevel, message: &str, method: &str, path: &str, status: Option<u16>) {
        let mut context = HashMap::new();
        context.insert("method".to_string(), method.to_string());
        context.insert("path".to_string(), path.to_string());
        if let Some(status) = status {
            context.insert("status".to_string(), status.to_string());
        }
        self.logger.log(level, message, Some(&context));
    }
}

/// Encodes a caller payload as JSON.
pub(crate) fn to_payload<P: Serialize + ?Sized>(payload: &P) -> MultivizResult<Value> {
    Ok(serde_json::to_value(payload)?)
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("custom_headers", &self.custom_headers.len())
            .finish()
    }
}
