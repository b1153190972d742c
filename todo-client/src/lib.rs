//! todo-client: the view controller behind the todo list web page.
//!
//! The page has three regions (login form, signup form, todo list) and talks
//! to a small JSON API with cookie sessions. This crate holds everything but
//! the widgets:
//!
//! - [`api`]: typed endpoints over a pluggable [`Transport`](api::Transport)
//! - [`message`]: what to show when a call fails
//! - [`view`]: [`ViewState`](view::ViewState), the [`Renderer`](view::Renderer) seam
//!   and the retained [`Screen`](view::Screen)
//! - [`controller`]: [`ViewController`](controller::ViewController), which ties them together
//!
//! # Example
//!
//! ```ignore
//! use todo_client::prelude::*;
//!
//! let api = Api::new(FetchTransport::new(ClientConfig::from_env()));
//! let mut controller = ViewController::new(api, Screen::new());
//! controller.boot().await;
//! controller.login("ada", "hunter2").await;
//! assert_eq!(controller.state(), ViewState::LoggedIn);
//! ```
//!
//! # Features
//!
//! - `web`: `FetchTransport`, a `fetch`-based transport for wasm32 builds

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod message;
pub mod todo;
pub mod view;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::ClientError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{Api, ApiRequest, ApiResponse, Method, Transport};
    pub use crate::config::ClientConfig;
    pub use crate::controller::{Action, ViewController};
    pub use crate::error::ClientError;
    pub use crate::todo::{Todo, TodoId};
    pub use crate::view::{EditKey, EditOutcome, InlineEdit, Renderer, Screen, ViewState};

    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    pub use crate::web::FetchTransport;
}
