use std::cell::RefCell;
use std::rc::Rc;

use todo_client::todo::Todo;
use todo_client::view::{Renderer, Screen, ViewState};

/// A [`Screen`] shared between the controller task and the egui draw loop.
///
/// Every update asks egui for a repaint, since nothing else wakes the UI
/// when a response arrives. Borrows never outlive a single call; the draw
/// loop and the controller task never run at the same time.
#[derive(Clone)]
pub struct SharedScreen {
    screen: Rc<RefCell<Screen>>,
    ctx: egui::Context,
}

impl SharedScreen {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            screen: Rc::new(RefCell::new(Screen::new())),
            ctx: ctx.clone(),
        }
    }

    /// Copy of the current view model, for drawing one frame.
    pub fn snapshot(&self) -> Screen {
        self.screen.borrow().clone()
    }

    pub fn take_clear_todo_input(&self) -> bool {
        self.screen.borrow_mut().take_clear_todo_input()
    }

    fn update(&mut self, f: impl FnOnce(&mut Screen)) {
        f(&mut self.screen.borrow_mut());
        self.ctx.request_repaint();
    }
}

impl Renderer for SharedScreen {
    fn show_view(&mut self, view: ViewState) {
        self.update(|s| s.show_view(view));
    }

    fn set_greeting(&mut self, greeting: &str) {
        self.update(|s| s.set_greeting(greeting));
    }

    fn set_login_error(&mut self, message: &str) {
        self.update(|s| s.set_login_error(message));
    }

    fn set_todo_error(&mut self, message: &str) {
        self.update(|s| s.set_todo_error(message));
    }

    fn render_todos(&mut self, todos: &[Todo]) {
        self.update(|s| s.render_todos(todos));
    }

    fn clear_todo_input(&mut self) {
        self.update(|s| s.clear_todo_input());
    }
}
