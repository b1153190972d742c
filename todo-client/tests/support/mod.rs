//! Test fixtures: an in-process stand-in for the todo API and two transports.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use todo_client::prelude::*;
use todo_client::todo::TodoList;
use tower::ServiceExt;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fake server
// ============================================================================

#[derive(Debug, Clone)]
struct StoredTodo {
    id: u64,
    owner: String,
    text: String,
    completed: bool,
}

/// A response returned instead of running the real handler.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl Canned {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain;charset=UTF-8"),
            body: body.to_string(),
        }
    }

    fn into_response(self) -> Response {
        let mut builder = Response::builder().status(self.status);
        if let Some(ct) = self.content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

#[derive(Debug, Default)]
struct ServerState {
    users: HashMap<String, String>,
    sessions: HashMap<String, String>,
    todos: Vec<StoredTodo>,
    next_id: u64,
    next_token: u64,
    overrides: HashMap<(String, String), Canned>,
}

type Shared = Arc<Mutex<ServerState>>;

/// In-memory server with the same routes and status codes as the real one.
#[derive(Clone, Default)]
pub struct FakeServer {
    state: Shared,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(username.into(), password.into());
        self
    }

    /// Answer `method path` with `canned` from now on.
    pub fn fail(&self, method: Method, path: &str, canned: Canned) {
        self.state
            .lock()
            .unwrap()
            .overrides
            .insert((method.as_str().to_string(), path.to_string()), canned);
    }

    pub fn seed_todo(&self, owner: &str, text: &str) -> TodoId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.todos.push(StoredTodo {
            id,
            owner: owner.into(),
            text: text.into(),
            completed: false,
        });
        TodoId::from(id)
    }

    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/users", post(signup))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/me", get(me))
            .route("/api/todos", get(list_todos).post(create_todo))
            .route("/api/todos/{id}", patch(update_todo).delete(delete_todo))
            .layer(middleware::from_fn_with_state(
                self.state.clone(),
                overrides,
            ))
            .with_state(self.state.clone())
    }

    pub fn transport(&self) -> RouterTransport {
        RouterTransport::new(self.router())
    }
}

async fn overrides(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let key = (
        request.method().as_str().to_string(),
        request.uri().path().to_string(),
    );
    let canned = state.lock().unwrap().overrides.get(&key).cloned();
    match canned {
        Some(canned) => canned.into_response(),
        None => next.run(request).await,
    }
}

fn session_user(state: &ServerState, headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == "session").then_some(value)
    })?;
    state.sessions.get(token).cloned()
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

#[derive(Deserialize)]
struct CredentialsBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn signup(State(state): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let username = body.username.trim().to_string();
    if username.is_empty() || body.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing username or password" })),
        )
            .into_response();
    }
    let mut state = state.lock().unwrap();
    if state.users.contains_key(&username) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Username already exists" })),
        )
            .into_response();
    }
    state.users.insert(username, body.password);
    (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<CredentialsBody>) -> Response {
    let username = body.username.trim().to_string();
    let mut state = state.lock().unwrap();
    if state.users.get(&username) != Some(&body.password) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid credentials" })),
        )
            .into_response();
    }
    state.next_token += 1;
    let token = format!("tok{}", state.next_token);
    state.sessions.insert(token.clone(), username);
    let cookie = format!("session={token}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=3600");
    ([(header::SET_COOKIE, cookie)], Json(json!({ "ok": true }))).into_response()
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(user) = session_user(&state, &headers) {
        state.sessions.retain(|_, owner| *owner != user);
    }
    (
        StatusCode::NO_CONTENT,
        [(
            header::SET_COOKIE,
            "session=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        )],
    )
        .into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    match session_user(&state, &headers) {
        Some(user) => Json(json!({ "message": format!("Hello, {user}!") })).into_response(),
        None => unauthorized(),
    }
}

async fn list_todos(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    let Some(user) = session_user(&state, &headers) else {
        return unauthorized();
    };
    let todos: Vec<_> = state
        .todos
        .iter()
        .rev()
        .filter(|t| t.owner == user)
        .map(|t| {
            json!({
                "id": t.id,
                "text": t.text,
                "completed": t.completed,
                "created_at": "2024-01-01 00:00:00",
            })
        })
        .collect();
    Json(json!({ "todos": todos })).into_response()
}

#[derive(Deserialize)]
struct TextBody {
    #[serde(default)]
    text: String,
}

async fn create_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<TextBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(user) = session_user(&state, &headers) else {
        return unauthorized();
    };
    let text = body.text.trim().to_string();
    if text.is_empty() {
        return (StatusCode::BAD_REQUEST, "Missing 'text'").into_response();
    }
    state.next_id += 1;
    let id = state.next_id;
    state.todos.push(StoredTodo {
        id,
        owner: user,
        text: text.clone(),
        completed: false,
    });
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "text": text, "completed": false })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct PatchBody {
    text: Option<String>,
    completed: Option<bool>,
}

async fn update_todo(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(body): Json<PatchBody>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(user) = session_user(&state, &headers) else {
        return unauthorized();
    };
    let Some(todo) = state
        .todos
        .iter_mut()
        .find(|t| t.id == id && t.owner == user)
    else {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    };
    if let Some(text) = body.text {
        todo.text = text.trim().to_string();
    }
    if let Some(completed) = body.completed {
        todo.completed = completed;
    }
    Json(json!({ "ok": true })).into_response()
}

async fn delete_todo(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(user) = session_user(&state, &headers) else {
        return unauthorized();
    };
    let before = state.todos.len();
    state.todos.retain(|t| !(t.id == id && t.owner == user));
    if state.todos.len() == before {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

// ============================================================================
// Transports
// ============================================================================

/// Sends requests straight into a [`Router`], keeping the session cookie
/// between calls the way a browser would.
pub struct RouterTransport {
    router: Router,
    cookie: Mutex<Option<String>>,
    requests: Mutex<Vec<ApiRequest>>,
    offline: Mutex<bool>,
}

impl RouterTransport {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            cookie: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            offline: Mutex::new(false),
        }
    }

    /// Every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Make every following request fail before reaching the server.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    pub fn has_cookie(&self) -> bool {
        self.cookie.lock().unwrap().is_some()
    }

    fn store_cookie(&self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let cookie = match pair.split_once('=') {
            Some((_, value)) if !value.is_empty() => Some(pair.to_string()),
            _ => None,
        };
        *self.cookie.lock().unwrap() = cookie;
    }
}

impl Transport for RouterTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if *self.offline.lock().unwrap() {
            return Err(ClientError::Request("network unreachable".into()));
        }

        let mut builder = axum::http::Request::builder()
            .method(request.method.as_str())
            .uri(&request.path)
            .header(header::CONTENT_TYPE, "application/json");
        let cookie = self.cookie.lock().unwrap().clone();
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match &request.body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let http_request = builder
            .body(body)
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            self.store_cookie(set_cookie);
        }
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?
            .to_bytes();

        Ok(ApiResponse::new(
            status,
            content_type,
            String::from_utf8_lossy(&bytes),
        ))
    }
}

/// Replays queued responses in order and records what was asked.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<ApiResponse, ClientError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: ApiResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: ClientError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<(Method, String)> {
        self.requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Request("no scripted response".into())))
    }
}

pub fn json(status: u16, body: serde_json::Value) -> ApiResponse {
    ApiResponse::new(status, Some("application/json".into()), body.to_string())
}

pub fn text(status: u16, body: &str) -> ApiResponse {
    ApiResponse::new(status, Some("text/plain;charset=UTF-8".into()), body)
}

/// What `GET /api/todos` says right now, fetched outside the controller.
pub async fn server_todos<T: Transport>(api: &Api<T>) -> Vec<Todo> {
    let response = api.list_todos().await.unwrap();
    assert!(response.is_success(), "list failed: {response:?}");
    response.json::<TodoList>().unwrap().todos
}

pub type RouterController = ViewController<RouterTransport, Screen>;

/// A controller wired to `server`.
pub fn controller(server: &FakeServer) -> RouterController {
    init_tracing();
    ViewController::new(Api::new(server.transport()), Screen::new())
}

/// A controller logged in as `username`.
pub async fn logged_in(server: &FakeServer, username: &str, password: &str) -> RouterController {
    let mut controller = controller(server);
    controller.boot().await;
    controller.login(username, password).await;
    assert_eq!(controller.state(), ViewState::LoggedIn);
    controller
}
