//! Turning failed responses into something to show the user.
//!
//! These functions never fail: whatever the response looks like, the caller
//! gets a displayable line back.

use crate::api::ApiResponse;

pub const MISSING_CREDENTIALS: &str = "Missing username or password";
pub const LOGIN_FAILED: &str = "Login failed";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub const SESSION_NOT_RECOGNIZED: &str = "Logged in, but session not recognized";
pub const SIGNUP_FAILED: &str = "Failed to create user";
pub const SIGNUP_LOGIN_FAILED: &str = "Account created, but login failed";
pub const SIGNUP_SESSION_NOT_RECOGNIZED: &str = "Signed up, but session not recognized";
pub const LOAD_TODOS_FAILED: &str = "Failed to load todos";
pub const CREATE_TODO_FAILED: &str = "Failed to create todo";

/// Fields checked, in order, in a JSON error body.
const MESSAGE_FIELDS: [&str; 2] = ["error", "message"];

/// Find a message in the response body, if there is one.
///
/// A response labelled as JSON only ever yields its `error` or `message`
/// field; its raw text is never shown. Anything else yields its trimmed text.
pub fn extract(response: &ApiResponse) -> Option<String> {
    if response.is_json() {
        let value: serde_json::Value = serde_json::from_str(&response.body).ok()?;
        MESSAGE_FIELDS
            .iter()
            .filter_map(|field| value.get(field)?.as_str())
            .find(|msg| !msg.is_empty())
            .map(str::to_string)
    } else {
        plain_text(response)
    }
}

/// The trimmed body text, if any.
pub fn plain_text(response: &ApiResponse) -> Option<String> {
    let text = response.text().trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// [`extract`], falling back to `fallback`.
pub fn or_fallback(response: &ApiResponse, fallback: &str) -> String {
    extract(response).unwrap_or_else(|| fallback.to_string())
}

/// [`plain_text`], falling back to `fallback`.
pub fn text_or_fallback(response: &ApiResponse, fallback: &str) -> String {
    plain_text(response).unwrap_or_else(|| fallback.to_string())
}

/// Message for a rejected `POST /api/login`.
///
/// A 401 that carries no message of its own reads as bad credentials.
pub fn login_failure(response: &ApiResponse) -> String {
    match extract(response) {
        Some(msg) => msg,
        None if response.status == 401 => INVALID_CREDENTIALS.to_string(),
        None => LOGIN_FAILED.to_string(),
    }
}
