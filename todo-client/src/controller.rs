//! The view controller.
//!
//! [`ViewController`] owns the [`ViewState`], turns user actions into API
//! calls and API responses into renderer updates. Every operation runs to
//! completion and leaves the UI in a stable state; nothing here returns an
//! error to the caller.
//!
//! Writes are never applied locally. After any create, update or delete the
//! whole list is fetched again, so what is rendered is always what the
//! server last returned.

use crate::api::{Api, ApiResponse, Credentials, SessionInfo, Transport};
use crate::error::ClientError;
use crate::message;
use crate::todo::{TodoId, TodoList, TodoPatch};
use crate::view::{Renderer, ViewState};

/// One user event, as queued by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Boot,
    Login { username: String, password: String },
    ShowSignup,
    HideSignup,
    Signup { username: String, password: String },
    Logout,
    /// Re-fetch the list, e.g. to abandon an inline edit.
    Reload,
    SubmitTodo { text: String },
    ToggleComplete { id: TodoId, completed: bool },
    EditText { id: TodoId, text: String },
    Delete { id: TodoId },
}

/// Result of asking the server who we are.
enum Session {
    Active(SessionInfo),
    /// Rejected, with the response if one arrived.
    Rejected(Option<ApiResponse>),
}

pub struct ViewController<T, R> {
    api: Api<T>,
    renderer: R,
    state: ViewState,
}

impl<T: Transport, R: Renderer> ViewController<T, R> {
    /// Create the controller. The login view is shown until [`boot`](Self::boot) runs.
    pub fn new(api: Api<T>, mut renderer: R) -> Self {
        let state = ViewState::LoggedOut;
        renderer.show_view(state);
        Self {
            api,
            renderer,
            state,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Apply one queued action.
    pub async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Boot => self.boot().await,
            Action::Login { username, password } => self.login(&username, &password).await,
            Action::ShowSignup => self.show_signup(),
            Action::HideSignup => self.hide_signup(),
            Action::Signup { username, password } => self.signup(&username, &password).await,
            Action::Logout => self.logout().await,
            Action::Reload => self.load_todos().await,
            Action::SubmitTodo { text } => {
                self.submit_todo(&text).await;
            }
            Action::ToggleComplete { id, completed } => {
                self.toggle_complete(&id, completed).await
            }
            Action::EditText { id, text } => {
                self.edit_text(&id, &text).await;
            }
            Action::Delete { id } => self.delete_todo(&id).await,
        }
    }

    // ========================================================================
    // View transitions
    // ========================================================================

    fn transition(&mut self, to: ViewState) {
        if self.state != to {
            tracing::info!(from = ?self.state, to = ?to, "view transition");
        }
        self.state = to;
        self.renderer.show_view(to);
    }

    /// Back to the login form. Whatever the last session rendered is dropped.
    fn show_login(&mut self, message: &str) {
        self.transition(ViewState::LoggedOut);
        self.renderer.render_todos(&[]);
        self.renderer.set_greeting("");
        self.renderer.set_login_error(message);
    }

    fn show_main(&mut self, greeting: &str) {
        self.transition(ViewState::LoggedIn);
        self.renderer.set_greeting(greeting);
    }

    /// Swap the login form for the signup form.
    pub fn show_signup(&mut self) {
        if self.state == ViewState::LoggedIn {
            return;
        }
        self.transition(ViewState::SigningUp);
        self.renderer.set_login_error("");
    }

    /// Back to the login form.
    pub fn hide_signup(&mut self) {
        if self.state == ViewState::LoggedIn {
            return;
        }
        self.transition(ViewState::LoggedOut);
        self.renderer.set_login_error("");
    }

    // ========================================================================
    // Session
    // ========================================================================

    async fn check_session(&self) -> Session {
        match self.api.me().await {
            Ok(response) if response.is_success() => {
                let info = response.json::<SessionInfo>().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "unreadable session body");
                    SessionInfo::default()
                });
                Session::Active(info)
            }
            Ok(response) => Session::Rejected(Some(response)),
            Err(e) => {
                tracing::warn!(error = %e, "session check failed");
                Session::Rejected(None)
            }
        }
    }

    async fn enter(&mut self, session: SessionInfo) {
        self.show_main(&session.message);
        self.load_todos().await;
    }

    /// Decide the first view from whether the session cookie is still good.
    pub async fn boot(&mut self) {
        match self.check_session().await {
            Session::Active(info) => self.enter(info).await,
            Session::Rejected(_) => self.show_login(""),
        }
    }

    /// Validate form input. Usernames are trimmed, passwords are not.
    fn credentials(&mut self, username: &str, password: &str) -> Option<Credentials> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            self.renderer.set_login_error(message::MISSING_CREDENTIALS);
            return None;
        }
        Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub async fn login(&mut self, username: &str, password: &str) {
        self.renderer.set_login_error("");
        let Some(credentials) = self.credentials(username, password) else {
            return;
        };

        match self.api.login(&credentials).await {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                tracing::info!(status = response.status, "login rejected");
                self.renderer
                    .set_login_error(&message::login_failure(&response));
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                self.renderer.set_login_error(message::LOGIN_FAILED);
                return;
            }
        }

        // The cookie was just set; make sure the server sees it.
        match self.check_session().await {
            Session::Active(info) => self.enter(info).await,
            Session::Rejected(response) => {
                tracing::warn!("login accepted but session not recognized");
                let msg = response
                    .as_ref()
                    .and_then(message::plain_text)
                    .unwrap_or_else(|| message::SESSION_NOT_RECOGNIZED.to_string());
                self.renderer.set_login_error(&msg);
            }
        }
    }

    /// Create an account, then log straight into it.
    pub async fn signup(&mut self, username: &str, password: &str) {
        self.renderer.set_login_error("");
        let Some(credentials) = self.credentials(username, password) else {
            return;
        };

        match self.api.create_user(&credentials).await {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                tracing::info!(status = response.status, "signup rejected");
                let msg = message::text_or_fallback(&response, message::SIGNUP_FAILED);
                self.renderer.set_login_error(&msg);
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "signup request failed");
                self.renderer.set_login_error(message::SIGNUP_FAILED);
                return;
            }
        }

        let login = self.api.login(&credentials).await;
        self.hide_signup();
        match login {
            Ok(response) if response.is_success() => {}
            Ok(response) => {
                let msg = message::or_fallback(&response, message::SIGNUP_LOGIN_FAILED);
                self.renderer.set_login_error(&msg);
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "login after signup failed");
                self.renderer
                    .set_login_error(message::SIGNUP_LOGIN_FAILED);
                return;
            }
        }

        match self.check_session().await {
            Session::Active(info) => self.enter(info).await,
            Session::Rejected(_) => self.show_login(message::SIGNUP_SESSION_NOT_RECOGNIZED),
        }
    }

    /// Best effort: the local reset happens whatever the server says.
    pub async fn logout(&mut self) {
        match self.api.logout().await {
            Ok(response) if !response.is_success() => {
                tracing::debug!(status = response.status, "logout rejected");
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "logout request failed"),
        }
        self.show_login("");
    }

    // ========================================================================
    // Todos
    // ========================================================================

    /// Replace the rendered list with the server's.
    pub async fn load_todos(&mut self) {
        self.renderer.set_todo_error("");
        match self.api.list_todos().await {
            Ok(response) if response.is_success() => {
                let list = response.json::<TodoList>().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "unreadable todo list");
                    TodoList::default()
                });
                self.renderer.render_todos(&list.todos);
            }
            Ok(response) => {
                let msg = message::text_or_fallback(&response, message::LOAD_TODOS_FAILED);
                self.renderer.set_todo_error(&msg);
                self.renderer.render_todos(&[]);
            }
            Err(e) => {
                tracing::warn!(error = %e, "loading todos failed");
                self.renderer.set_todo_error(message::LOAD_TODOS_FAILED);
                self.renderer.render_todos(&[]);
            }
        }
    }

    /// Create a todo without touching the rendered list.
    ///
    /// Blank text sends nothing. Returns whether the server accepted it.
    pub async fn create_todo(&mut self, text: &str) -> bool {
        self.renderer.set_todo_error("");
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        match self.api.create_todo(text).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                let msg = message::text_or_fallback(&response, message::CREATE_TODO_FAILED);
                self.renderer.set_todo_error(&msg);
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "creating todo failed");
                self.renderer.set_todo_error(message::CREATE_TODO_FAILED);
                false
            }
        }
    }

    /// The new-todo form: create, clear the input, reload.
    pub async fn submit_todo(&mut self, text: &str) -> bool {
        if !self.create_todo(text).await {
            return false;
        }
        self.renderer.clear_todo_input();
        self.load_todos().await;
        true
    }

    pub async fn toggle_complete(&mut self, id: &TodoId, completed: bool) {
        let result = self
            .api
            .update_todo(id, &TodoPatch::completed(completed))
            .await;
        log_best_effort("toggle", id, result);
        self.load_todos().await;
    }

    /// Rename a todo. Blank text sends nothing and returns `false`.
    pub async fn edit_text(&mut self, id: &TodoId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let result = self.api.update_todo(id, &TodoPatch::text(text)).await;
        log_best_effort("edit", id, result);
        self.load_todos().await;
        true
    }

    pub async fn delete_todo(&mut self, id: &TodoId) {
        let result = self.api.delete_todo(id).await;
        log_best_effort("delete", id, result);
        self.load_todos().await;
    }
}

/// Failures of best-effort writes are logged and otherwise ignored.
fn log_best_effort(op: &str, id: &TodoId, result: Result<ApiResponse, ClientError>) {
    match result {
        Ok(response) if response.is_success() => {}
        Ok(response) => {
            tracing::warn!(op = %op, %id, status = response.status, "todo write rejected")
        }
        Err(e) => tracing::warn!(op = %op, %id, error = %e, "todo write failed"),
    }
}
