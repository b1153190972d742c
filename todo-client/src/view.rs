//! View state and the rendering seam.
//!
//! The controller never touches UI widgets. It pushes updates through a
//! [`Renderer`]; [`Screen`] is the retained implementation the egui front
//! end draws from and the tests inspect.

use crate::todo::{Todo, TodoId};

/// Which UI region is visible. Exactly one is at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    /// Login form.
    #[default]
    LoggedOut,
    /// Signup form, shown in place of the login form.
    SigningUp,
    /// Greeting, todo form and list.
    LoggedIn,
}

/// Output side of the controller.
pub trait Renderer {
    fn show_view(&mut self, view: ViewState);
    fn set_greeting(&mut self, greeting: &str);
    fn set_login_error(&mut self, message: &str);
    fn set_todo_error(&mut self, message: &str);
    fn render_todos(&mut self, todos: &[Todo]);

    /// The new-todo input should be emptied.
    fn clear_todo_input(&mut self) {}
}

/// Retained view model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    view: ViewState,
    greeting: String,
    login_error: String,
    todo_error: String,
    todos: Vec<Todo>,
    generation: u64,
    clear_todo_input: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    pub fn login_error(&self) -> &str {
        &self.login_error
    }

    pub fn todo_error(&self) -> &str {
        &self.todo_error
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Bumped on every [`Renderer::render_todos`], even if the list is unchanged.
    ///
    /// An inline edit started at an older generation is stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_login_visible(&self) -> bool {
        self.view == ViewState::LoggedOut
    }

    pub fn is_signup_visible(&self) -> bool {
        self.view == ViewState::SigningUp
    }

    pub fn is_main_visible(&self) -> bool {
        self.view == ViewState::LoggedIn
    }

    /// Consume a pending "clear the todo input" request.
    pub fn take_clear_todo_input(&mut self) -> bool {
        std::mem::take(&mut self.clear_todo_input)
    }
}

impl Renderer for Screen {
    fn show_view(&mut self, view: ViewState) {
        self.view = view;
    }

    fn set_greeting(&mut self, greeting: &str) {
        self.greeting = greeting.to_string();
    }

    fn set_login_error(&mut self, message: &str) {
        self.login_error = message.to_string();
    }

    fn set_todo_error(&mut self, message: &str) {
        self.todo_error = message.to_string();
    }

    fn render_todos(&mut self, todos: &[Todo]) {
        self.todos = todos.to_vec();
        self.generation += 1;
    }

    fn clear_todo_input(&mut self) {
        self.clear_todo_input = true;
    }
}

/// Keys that end an inline edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Enter,
    Escape,
    /// The input lost focus.
    Blur,
}

/// What an inline edit resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Save the trimmed text.
    Commit { id: TodoId, text: String },
    /// Throw the draft away and reload from the server.
    Discard,
    /// Nothing to save; the edit stays open. Only Enter takes focus back.
    Keep { refocus: bool },
}

/// A todo's text being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub id: TodoId,
    pub draft: String,
    /// [`Screen::generation`] when the edit started.
    pub generation: u64,
}

impl InlineEdit {
    pub fn begin(todo: &Todo, generation: u64) -> Self {
        Self {
            id: todo.id.clone(),
            draft: todo.text.clone(),
            generation,
        }
    }

    /// `false` once the list has been re-rendered underneath the edit.
    pub fn is_current(&self, screen: &Screen) -> bool {
        self.generation == screen.generation()
    }

    pub fn finish(&self, key: EditKey) -> EditOutcome {
        match key {
            EditKey::Escape => EditOutcome::Discard,
            EditKey::Enter | EditKey::Blur => {
                let text = self.draft.trim();
                if text.is_empty() {
                    EditOutcome::Keep {
                        refocus: key == EditKey::Enter,
                    }
                } else {
                    EditOutcome::Commit {
                        id: self.id.clone(),
                        text: text.to_string(),
                    }
                }
            }
        }
    }
}
