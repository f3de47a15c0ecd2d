//! HTTP transport layer for the backend store.

use crate::config::ClientConfig;
use crate::error::{MealPlannerError, MealPlannerResult};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport for making backend requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> MealPlannerResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    /// Build a URL by appending path segments to the base URL.
    ///
    /// Segments are percent-encoded, so ids may contain any character.
    fn build_url(&self, segments: &[&str]) -> MealPlannerResult<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MealPlannerError::Config(format!(
                    "base URL {} cannot carry a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and fail on any non-success status.
    async fn execute(&self, request_builder: RequestBuilder) -> MealPlannerResult<Response> {
        let response = request_builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Backend request failed");
        Err(MealPlannerError::from_response(status.as_u16(), &body))
    }

    /// Decode a JSON body; an empty body reads as `null`.
    async fn read_json(response: Response) -> MealPlannerResult<Value> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a GET request.
    pub async fn get(&self, segments: &[&str]) -> MealPlannerResult<Value> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.client.get(url)).await?;
        Self::read_json(response).await
    }

    /// Execute a GET request, treating any non-success status as absence.
    pub async fn get_optional(&self, segments: &[&str]) -> MealPlannerResult<Option<Value>> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "GET request (optional)");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "Entity absent");
            return Ok(None);
        }
        Self::read_json(response).await.map(Some)
    }

    /// Execute a POST request.
    pub async fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> MealPlannerResult<Value> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "POST request");

        let response = self.execute(self.client.post(url).json(body)).await?;
        Self::read_json(response).await
    }

    /// Execute a PATCH request.
    pub async fn patch<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> MealPlannerResult<Value> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "PATCH request");

        let response = self.execute(self.client.patch(url).json(body)).await?;
        Self::read_json(response).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, segments: &[&str]) -> MealPlannerResult<Value> {
        let url = self.build_url(segments)?;
        debug!(url = %url, "DELETE request");

        let response = self.execute(self.client.delete(url)).await?;
        Self::read_json(response).await
    }
}
