use todo_client::controller::Action;

#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Username and password fields. Returns `true` if Enter was pressed in either.
fn credential_fields(ui: &mut egui::Ui, form: &mut LoginForm) -> bool {
    let username = ui.add(egui::TextEdit::singleline(&mut form.username).hint_text("Username"));
    let password = ui.add(
        egui::TextEdit::singleline(&mut form.password)
            .password(true)
            .hint_text("Password"),
    );
    (username.lost_focus() || password.lost_focus())
        && ui.input(|i| i.key_pressed(egui::Key::Enter))
}

fn error_line(ui: &mut egui::Ui, error: &str) {
    if !error.is_empty() {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }
}

pub fn login_form(ui: &mut egui::Ui, form: &mut LoginForm, error: &str) -> Option<Action> {
    let mut action = None;
    ui.group(|ui| {
        ui.label("Log in");
        let submitted = credential_fields(ui, form);

        ui.horizontal(|ui| {
            if ui.button("Log in").clicked() || submitted {
                action = Some(Action::Login {
                    username: form.username.clone(),
                    password: form.password.clone(),
                });
            }
            if ui.button("Sign up").clicked() {
                action = Some(Action::ShowSignup);
            }
        });

        error_line(ui, error);
    });
    action
}

pub fn signup_form(ui: &mut egui::Ui, form: &mut LoginForm, error: &str) -> Option<Action> {
    let mut action = None;
    ui.group(|ui| {
        ui.label("Create an account");
        let submitted = credential_fields(ui, form);

        ui.horizontal(|ui| {
            if ui.button("Create account").clicked() || submitted {
                action = Some(Action::Signup {
                    username: form.username.clone(),
                    password: form.password.clone(),
                });
            }
            if ui.button("Cancel").clicked() {
                action = Some(Action::HideSignup);
            }
        });

        error_line(ui, error);
    });
    action
}
