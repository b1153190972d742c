use todo_client::controller::Action;
use todo_client::view::{EditKey, EditOutcome, InlineEdit, Screen};

fn edit_id(ui: &egui::Ui, edit: &InlineEdit) -> egui::Id {
    ui.make_persistent_id(("todo-edit", edit.id.as_str()))
}

pub fn todo_list(
    ui: &mut egui::Ui,
    screen: &Screen,
    editing: &mut Option<InlineEdit>,
) -> Option<Action> {
    let mut action = None;
    let mut start_edit = None;

    for todo in screen.todos() {
        ui.horizontal(|ui| {
            let mut completed = todo.completed;
            if ui.checkbox(&mut completed, "").changed() {
                action = Some(Action::ToggleComplete {
                    id: todo.id.clone(),
                    completed,
                });
            }

            match editing.as_mut().filter(|e| e.id == todo.id) {
                Some(edit) => {
                    if let Some(a) = edit_field(ui, edit) {
                        action = Some(a);
                    }
                }
                None => {
                    let text = if todo.completed {
                        egui::RichText::new(&todo.text).strikethrough()
                    } else {
                        egui::RichText::new(&todo.text)
                    };
                    let label = ui.add(egui::Label::new(text).sense(egui::Sense::click()));
                    if label.on_hover_text("Click to edit").clicked() {
                        start_edit = Some(InlineEdit::begin(todo, screen.generation()));
                    }
                }
            }

            if ui.button("Delete").clicked() {
                action = Some(Action::Delete {
                    id: todo.id.clone(),
                });
            }
        });
    }

    if let Some(edit) = start_edit {
        let id = edit_id(ui, &edit);
        ui.memory_mut(|m| m.request_focus(id));
        *editing = Some(edit);
    }

    action
}

/// The text input standing in for a todo's label while it is edited.
fn edit_field(ui: &mut egui::Ui, edit: &mut InlineEdit) -> Option<Action> {
    let id = edit_id(ui, edit);
    let response = ui.add(egui::TextEdit::singleline(&mut edit.draft).id(id));
    if !response.lost_focus() {
        return None;
    }

    let key = ui.input(|i| {
        if i.key_pressed(egui::Key::Escape) {
            EditKey::Escape
        } else if i.key_pressed(egui::Key::Enter) {
            EditKey::Enter
        } else {
            EditKey::Blur
        }
    });

    match edit.finish(key) {
        EditOutcome::Commit { id, text } => Some(Action::EditText { id, text }),
        EditOutcome::Discard => Some(Action::Reload),
        EditOutcome::Keep { refocus } => {
            if refocus {
                response.request_focus();
            }
            None
        }
    }
}
