//! The single configured HTTP client shared by every resource.
//!
//! # Design
//! `ApiClient` holds a base URL and a transport and nothing else. Each call
//! is split into building an `HttpRequest`, handing it to the transport, and
//! parsing the `HttpResponse`. Building and parsing are pure, so they are
//! tested directly without any network.
//!
//! Every request carries `content-type: application/json`. Any 2xx status is
//! success; anything else becomes `ApiError::Status` without further
//! distinction.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl<T> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path`, which must start with `/`.
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    /// Execute one request and decode its body.
    pub fn send<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<R, ApiError> {
        let request = self.build_request(method, path, body);
        debug!(method = method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        parse_response(response)
    }
}

pub fn encode_body<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Check for a 2xx status and decode the JSON body. An empty body decodes
/// as JSON `null`.
pub fn parse_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            body: response.body,
        });
    }
    let body = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
