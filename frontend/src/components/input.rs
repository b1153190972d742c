use todo_client::controller::Action;

/// New-todo field. The controller clears it once the todo is saved.
pub fn todo_input(ui: &mut egui::Ui, text: &mut String) -> Option<Action> {
    let mut action = None;
    ui.horizontal(|ui| {
        let text_edit = ui.add(egui::TextEdit::singleline(text).hint_text("What needs doing?"));
        if ui.button("Add").clicked()
            || text_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
        {
            action = Some(Action::SubmitTodo { text: text.clone() });
        }
    });
    action
}
