use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedSender};
use todo_client::prelude::*;

use crate::components::{LoginForm, login_form, signup_form, todo_input, todo_list};
use crate::screen::SharedScreen;

/// The egui app. Draws from the shared [`Screen`] and queues user events.
pub struct TodoApp {
    screen: SharedScreen,
    actions: UnboundedSender<Action>,

    // Widget state the controller never sees
    login: LoginForm,
    signup: LoginForm,
    new_todo: String,
    editing: Option<InlineEdit>,
}

impl TodoApp {
    pub fn new(ctx: &egui::Context, config: ClientConfig) -> Self {
        let screen = SharedScreen::new(ctx);
        let actions = spawn_controller(screen.clone(), config);
        Self {
            screen,
            actions,
            login: LoginForm::default(),
            signup: LoginForm::default(),
            new_todo: String::new(),
            editing: None,
        }
    }

    fn send(&mut self, action: Action) {
        if action == Action::ShowSignup {
            self.signup = LoginForm::default();
        }
        if let Err(e) = self.actions.unbounded_send(action) {
            log::error!("Controller task is gone: {e}");
        }
    }
}

/// Run the controller on its own task, applying queued actions one at a time.
fn spawn_controller(screen: SharedScreen, config: ClientConfig) -> UnboundedSender<Action> {
    let (tx, mut rx) = mpsc::unbounded();
    wasm_bindgen_futures::spawn_local(async move {
        let api = Api::new(FetchTransport::new(config));
        let mut controller = ViewController::new(api, screen);
        controller.boot().await;
        while let Some(action) = rx.next().await {
            controller.dispatch(action).await;
        }
    });
    tx
}

impl eframe::App for TodoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.screen.take_clear_todo_input() {
            self.new_todo.clear();
        }
        let screen = self.screen.snapshot();
        if self.editing.as_ref().is_some_and(|e| !e.is_current(&screen)) {
            self.editing = None;
        }

        let mut action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Todo List");
            ui.add_space(8.0);

            action = match screen.view() {
                ViewState::LoggedOut => {
                    login_form(ui, &mut self.login, screen.login_error())
                }
                ViewState::SigningUp => {
                    signup_form(ui, &mut self.signup, screen.login_error())
                }
                ViewState::LoggedIn => {
                    let mut action = None;
                    ui.horizontal(|ui| {
                        ui.label(screen.greeting());
                        if ui.button("Log out").clicked() {
                            action = Some(Action::Logout);
                        }
                    });
                    ui.add_space(8.0);

                    action = action.or(todo_input(ui, &mut self.new_todo));
                    if !screen.todo_error().is_empty() {
                        ui.colored_label(ui.visuals().error_fg_color, screen.todo_error());
                    }
                    ui.add_space(16.0);

                    action.or(todo_list(ui, &screen, &mut self.editing))
                }
            };
        });

        if let Some(action) = action {
            self.send(action);
        }
    }
}
