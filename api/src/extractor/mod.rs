mod json;
mod principal;

pub use json::{Json, Valid};
pub use principal::CurrentUser;
