//! Browser transport built on `fetch`.

use gloo_net::http::{Request, RequestBuilder};
use web_sys::RequestCredentials;

use crate::api::{ApiRequest, ApiResponse, Method, Transport};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// [`Transport`] over the browser's `fetch`, sending cookies with every call.
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        builder
            .header("Content-Type", "application/json")
            .credentials(RequestCredentials::Include)
    }
}

impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let builder = self.builder(request.method, &request.path);
        let request = match &request.body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ClientError::Serialization(e.to_string()))?,
            None => builder.build()?,
        };

        let response = request.send().await?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        // An unreadable body is treated as empty; callers fall back to defaults.
        let body = response.text().await.unwrap_or_default();

        Ok(ApiResponse::new(status, content_type, body))
    }
}
