mod input;
mod list;
mod login;

pub use input::todo_input;
pub use list::todo_list;
pub use login::{LoginForm, login_form, signup_form};
