//! Typed access to the todo JSON API.
//!
//! Every call returns the raw [`ApiResponse`] whatever its status. Deciding
//! what a 401 or a 500 means is left to the caller; only failures that leave
//! no response at all surface as [`ClientError`].
//!
//! # Example
//!
//! ```ignore
//! use todo_client::api::Api;
//!
//! let api = Api::new(transport);
//! let response = api.me().await?;
//! if response.is_success() {
//!     let session: SessionInfo = response.json()?;
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

use crate::error::ClientError;
use crate::todo::{NewTodo, TodoId, TodoPatch};

pub const ME_PATH: &str = "/api/me";
pub const LOGIN_PATH: &str = "/api/login";
pub const LOGOUT_PATH: &str = "/api/logout";
pub const USERS_PATH: &str = "/api/users";
pub const TODOS_PATH: &str = "/api/todos";

/// Path of a single todo.
pub fn todo_path(id: &TodoId) -> String {
    format!("{TODOS_PATH}/{id}")
}

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to hand to a [`Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        let value =
            serde_json::to_value(body).map_err(|e| ClientError::Serialization(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// A response as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` when the server labelled the body as JSON.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("application/json"))
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Something that can carry an [`ApiRequest`] to the server.
///
/// Implementations must send session cookies with every request and label
/// request bodies as `application/json`.
pub trait Transport {
    fn send(&self, request: ApiRequest)
    -> impl Future<Output = Result<ApiResponse, ClientError>>;
}

/// Body of `POST /api/login` and `POST /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of a successful `GET /api/me`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub message: String,
}

/// Typed wrapper over a [`Transport`], one method per endpoint.
#[derive(Debug, Clone)]
pub struct Api<T> {
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        tracing::debug!(method = %request.method, path = %request.path, "api request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "api response");
        Ok(response)
    }

    /// `GET /api/me`
    pub async fn me(&self) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Get, ME_PATH)).await
    }

    /// `POST /api/login`
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Post, LOGIN_PATH).json(credentials)?)
            .await
    }

    /// `POST /api/logout` with an empty object body.
    pub async fn logout(&self) -> Result<ApiResponse, ClientError> {
        let body = serde_json::json!({});
        self.send(ApiRequest::new(Method::Post, LOGOUT_PATH).json(&body)?)
            .await
    }

    /// `POST /api/users`
    pub async fn create_user(&self, credentials: &Credentials) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Post, USERS_PATH).json(credentials)?)
            .await
    }

    /// `GET /api/todos`
    pub async fn list_todos(&self) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Get, TODOS_PATH)).await
    }

    /// `POST /api/todos`
    pub async fn create_todo(&self, text: &str) -> Result<ApiResponse, ClientError> {
        let body = NewTodo {
            text: text.to_string(),
        };
        self.send(ApiRequest::new(Method::Post, TODOS_PATH).json(&body)?)
            .await
    }

    /// `PATCH /api/todos/{id}`
    pub async fn update_todo(
        &self,
        id: &TodoId,
        patch: &TodoPatch,
    ) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Patch, todo_path(id)).json(patch)?)
            .await
    }

    /// `DELETE /api/todos/{id}`
    pub async fn delete_todo(&self, id: &TodoId) -> Result<ApiResponse, ClientError> {
        self.send(ApiRequest::new(Method::Delete, todo_path(id)))
            .await
    }
}
